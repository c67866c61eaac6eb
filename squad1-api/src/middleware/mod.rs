/// Middleware modules for the API server
///
/// - Security headers (including the chat vendor's CSP allowances)

pub mod security;
