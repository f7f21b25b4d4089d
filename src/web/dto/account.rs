use serde::{Deserialize, Serialize};

/// Registration page form. Field names follow the html form.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegistrationForm {
    pub username: String,
    #[serde(rename = "psw")]
    pub password: String,
    #[serde(rename = "firstname", default)]
    pub first_name: String,
    #[serde(rename = "lastname", default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginForm {
    pub username: String,
    #[serde(rename = "psw")]
    pub password: String,
}

/// Context of the registration and login pages.
#[derive(Debug, Default, Serialize, utoipa::ToSchema)]
pub struct FormContext {
    pub message: Option<String>,
}
