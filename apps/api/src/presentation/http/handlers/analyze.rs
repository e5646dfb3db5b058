use crate::{
    application::analyze_image::dto::AnalysisRequest,
    domain::analysis::entity::{ColorSeasonDescription, UploadedImage},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::MultipartRejection,
    },
};

/// Collect the analysis fields from a multipart form.
///
/// Only the first occurrence of each field counts. An `image` part without a
/// `filename` is not a file and is ignored.
async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut request = AnalysisRequest::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or("") {
            "hair_color" if request.hair_color.is_none() => {
                request.hair_color = Some(field.text().await?);
            }
            "eye_color" if request.eye_color.is_none() => {
                request.eye_color = Some(field.text().await?);
            }
            "image" if request.image.is_none() => {
                if let Some(filename) = field.file_name().map(str::to_owned) {
                    let data = field.bytes().await?;
                    request.image = Some(UploadedImage::new(filename, data));
                }
            }
            _ => {}
        }
    }

    Ok(request)
}

pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ColorSeasonDescription>, AppError> {
    let request = match multipart {
        Ok(multipart) => read_analysis_form(multipart).await?,
        Err(rejection) => {
            // Not a multipart body, so there is no file to find
            tracing::debug!(%rejection, "Request body is not multipart");
            AnalysisRequest::default()
        }
    };

    let description = state.analyze_use_case().execute(request).await?;
    Ok(Json(description))
}
