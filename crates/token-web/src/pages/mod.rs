mod token;

pub use token::TokenPage;
