use poem::{Error as PoemError, Result as PoemResult, http::StatusCode};
use poem_openapi::SecurityScheme;
use poem_openapi::auth::Bearer;

use crate::application::services::jwt::{JwtService, Role};

#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT")]
pub struct JwtAuth(pub Bearer);

pub struct Moderator {
    pub name: String,
}

impl JwtAuth {
    pub fn into_moderator(self, jwt: &JwtService) -> PoemResult<Moderator> {
        let claims = jwt.verify(&self.0.token).map_err(|_| {
            PoemError::from_string("invalid or expired token", StatusCode::UNAUTHORIZED)
        })?;

        if !claims.has_role(Role::Moderator) {
            return Err(PoemError::from_string(
                "moderator role required",
                StatusCode::FORBIDDEN,
            ));
        }

        Ok(Moderator { name: claims.sub })
    }
}
