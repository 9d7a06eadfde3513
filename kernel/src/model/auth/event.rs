#[derive(Debug)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

/// Privileged creation of a login-capable identity. The provider is asked
/// to mark the address confirmed so no verification mail goes out.
#[derive(Debug)]
pub struct CreateIdentity {
    pub email: String,
    pub password: String,
}
