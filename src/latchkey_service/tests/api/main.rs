mod change_password;
mod confirm_email;
mod helpers;
mod login;
mod ping;
mod resend_confirmation;
mod signup;
mod user;
