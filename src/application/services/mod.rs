pub mod jwt;
pub mod validator;
