pub mod cupcake_service;
