// src/handlers/ai.rs
// DOCUMENTATION: HTTP handler for standalone plan generation
// PURPOSE: Generate a plan for dates and places the client has not saved yet

use actix_web::{web, HttpResponse, Responder};

use crate::auth::RequireAuth;
use crate::errors::ApiError;
use crate::models::{GeneratePlanRequest, GeneratePlanResponse};
use crate::services::plan_generator::{build_trip_prompt, PlanGenerator};

/// POST /ai/generate-plan
pub async fn generate_plan(
    generator: web::Data<dyn PlanGenerator>,
    req: web::Json<GeneratePlanRequest>,
) -> Result<impl Responder, ApiError> {
    let (destination, city, start_date, end_date) = req
        .complete()
        .ok_or_else(|| ApiError::BadRequest("Incomplete data".to_string()))?;

    let prompt = build_trip_prompt(destination, city, start_date, end_date);
    let generated_plan = generator.generate(&prompt).await?;

    Ok(HttpResponse::Ok().json(GeneratePlanResponse { generated_plan }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ai")
            .wrap(RequireAuth)
            .route("/generate-plan", web::post().to(generate_plan)),
    );
}
