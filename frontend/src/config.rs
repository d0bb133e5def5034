#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3000"  // lead-intake default BIND_ADDR
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // served by lead-intake itself (STATIC_DIR)
}
