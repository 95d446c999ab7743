pub mod notifications;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use use_cases::{
    forgot_password::ForgotPasswordUseCase,
    login::LoginUseCase,
    profile::{GetProfileUseCase, UpdateProfileUseCase},
    register::RegisterUseCase,
    reset_password::ResetPasswordUseCase,
    seed_admin::{SeedAdminUseCase, SeedOutcome},
    verify::VerifyUseCase,
    Session,
};
