pub mod card_service;

pub use card_service::CardService;
