// handlers/public/auth/mod.rs - Public authentication handlers

pub mod login; // POST /login - verify credentials and get a token
pub mod register; // POST /register - create an account and get a token

pub use login::login_post;
pub use register::register_post;
