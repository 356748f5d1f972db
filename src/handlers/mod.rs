// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (JWT auth + resolved caller)
pub mod public; // /register, /login
pub mod protected; // /entries, /topics, /whoami
