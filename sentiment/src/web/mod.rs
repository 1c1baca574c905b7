// Copyright 2024. Felix Engl
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod page;

use crate::config::ServerConfig;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError};
use classifier::classifier::{DocumentClassifier, Prediction};
use page::Outcome;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMPTY_REVIEW: &str = "Please enter a review.";

/// The largest accepted urlencoded form, long reviews grow when encoded.
const FORM_LIMIT: usize = 1024 * 1024;

/// The form posted by the page.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub review: String,
}

/// The body of `POST /api/predict`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    pub review: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
enum SentimentResponseError {
    #[error("Please enter a review.")]
    EmptyReview,
}

impl ResponseError for SentimentResponseError {
    fn status_code(&self) -> StatusCode {
        match self {
            SentimentResponseError::EmptyReview => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody { error: self.to_string() })
    }
}

pub async fn get_form() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page::render(None, "").into_string())
}

pub async fn post_form(classifier: web::Data<DocumentClassifier>, form: web::Form<ReviewForm>) -> HttpResponse {
    let review = form.into_inner().review;
    if review.trim().is_empty() {
        return HttpResponse::BadRequest()
            .content_type(ContentType::html())
            .body(page::render(Some(Outcome::Error(EMPTY_REVIEW)), &review).into_string());
    }
    let prediction = classifier.predict(&review);
    log::debug!("Form review classified as {} ({:.3})", prediction.sentiment, prediction.probability);
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page::render(Some(Outcome::Prediction(prediction)), &review).into_string())
}

async fn post_predict(
    classifier: web::Data<DocumentClassifier>,
    request: web::Json<PredictRequest>,
) -> Result<web::Json<Prediction>, SentimentResponseError> {
    if request.review.trim().is_empty() {
        return Err(SentimentResponseError::EmptyReview);
    }
    Ok(web::Json(classifier.predict(&request.review)))
}

/// Registers the routes of the web form.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().limit(FORM_LIMIT))
        .route("/", web::get().to(get_form))
        .route("/", web::post().to(post_form))
        .route("/api/predict", web::post().to(post_predict));
}

/// Serves the form until the server is stopped, [classifier] is shared by all workers.
pub fn serve(classifier: DocumentClassifier, server: ServerConfig) -> std::io::Result<()> {
    let classifier = web::Data::new(classifier);
    actix_web::rt::System::new().block_on(async move {
        let mut http = HttpServer::new(move || App::new().app_data(classifier.clone()).configure(configure));
        if let Some(workers) = server.workers {
            http = http.workers(workers);
        }
        let http = http.bind((server.host.as_str(), server.port))?;
        log::info!("Serving the web form at http://{}:{}/", server.host, server.port);
        http.run().await
    })
}
