pub mod pet_service;
