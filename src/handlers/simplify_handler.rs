use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{request::SimplifyRequest, response::SimplifyResponse},
};

#[post("/api/simplify")]
pub async fn simplify(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<SimplifyRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let result = state.simplify_service.simplify(&request.text).await?;
    log::info!(
        "[{}] simplify served: explanation={:?} quiz={:?} ({} items)",
        get_request_id(&req).unwrap_or_default(),
        result.explanation_source,
        result.source,
        result.quiz.len()
    );

    Ok(HttpResponse::Ok().json(SimplifyResponse::from(result)))
}
