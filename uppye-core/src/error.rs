use thiserror::Error;

/// Errors surfaced by the auth domain.
///
/// `TokenReused` carries the same message as `InvalidToken`: the API
/// does not reveal whether a presented refresh token ever existed.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No principal could be established for the request.
    #[error("Authentication required")]
    Unauthenticated,

    /// The principal is known but lacks the required ability.
    #[error("Access denied")]
    Forbidden,

    /// The token failed signature, shape or expiry checks.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The refresh token verified fine but its session row is gone,
    /// meaning it was already spent by an earlier rotation.
    #[error("Invalid or expired token")]
    TokenReused,

    /// Unknown email or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account has no local password because it was created
    /// through a social identity provider.
    #[error("This account uses social login, sign in with your provider instead")]
    SocialLoginOnly,

    /// Infrastructure failure (session storage, token signing).
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
