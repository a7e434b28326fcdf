use log::error;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::{response, Request, Response};
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::{JsonSchema, Map};
use rocket_okapi::response::OpenApiResponderInner;
use serde::{Deserialize, Serialize};
use service::error::GenericError;

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
pub enum Error {
    ScoreError(ScoreError),
    /// PDGA could not be reached or answered with garbage
    ProviderUnavailable(String),
    UnknownError,
}

impl MyRocketError for Error {
    fn to_rocket_status(&self) -> Status {
        match self {
            Self::ScoreError(e) => e.to_rocket_status(),
            Self::ProviderUnavailable(_) => Status::BadGateway,
            Self::UnknownError => Status::InternalServerError,
        }
    }
    fn to_err_message(&self) -> Option<String> {
        match self {
            Self::ScoreError(e) => e.to_err_message(),
            Self::ProviderUnavailable(msg) => Some(msg.clone()),
            Self::UnknownError => Some("Unknown error".to_string()),
        }
    }
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut builder = Response::build();
        builder.status(self.to_rocket_status());
        if let Some(msg) = self.to_err_message() {
            builder.sized_body(msg.len(), std::io::Cursor::new(msg));
        }
        builder.ok()
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug)]
pub enum ScoreError {
    BadRequest(String),
    NotFound(String),
}

trait MyRocketError {
    fn to_rocket_status(&self) -> Status;
    fn to_err_message(&self) -> Option<String>;
}

impl MyRocketError for ScoreError {
    fn to_rocket_status(&self) -> Status {
        match self {
            Self::BadRequest(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
        }
    }
    fn to_err_message(&self) -> Option<String> {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => Some(msg.clone()),
        }
    }
}

impl From<ScoreError> for Error {
    fn from(e: ScoreError) -> Self {
        Self::ScoreError(e)
    }
}

impl From<GenericError> for Error {
    fn from(e: GenericError) -> Self {
        match e {
            GenericError::NotFound(msg) => ScoreError::NotFound(msg.to_string()).into(),
            GenericError::BadRequest(msg) => ScoreError::BadRequest(msg.to_string()).into(),
            GenericError::Provider(e) => Self::ProviderUnavailable(e.to_string()),
            e => {
                error!("{e}");
                Self::UnknownError
            }
        }
    }
}

impl OpenApiResponderInner for Error {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};

        let mut responses = Map::new();
        responses.insert(
            "400".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [400 Bad Request](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400)\n\
                The event has no tournament id, or the request is missing a field. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "404".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [404 Not Found](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404)\n\
                No PDGA event matched the lookup.\
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "422".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [422 Unprocessable Entity](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/422)\n\
                This response is given when you request body is not correctly formatted. \
                ".to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "500".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [500 Internal Server Error](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/500)\n\
                This response is given when something wend wrong on the server. \
                ".to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "502".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [502 Bad Gateway](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/502)\n\
                PDGA live results could not be fetched. \
                ".to_string(),
                ..Default::default()
            }),
        );
        Ok(Responses {
            responses,
            ..Default::default()
        })
    }
}
