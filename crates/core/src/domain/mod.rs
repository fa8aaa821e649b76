pub mod question;
pub mod questionnaire;
pub mod response;
pub mod sleep;
