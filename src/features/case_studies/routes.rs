use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::case_studies::{handlers, services::CaseStudyService};

/// Case study routes. `{key}` is the slug for reads and the id for writes.
pub fn routes(service: Arc<CaseStudyService>) -> Router {
    Router::new()
        .route(
            "/api/case-studies",
            get(handlers::list_case_studies).post(handlers::create_case_study),
        )
        .route(
            "/api/case-studies/{key}",
            get(handlers::get_case_study)
                .put(handlers::update_case_study)
                .delete(handlers::delete_case_study),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::case_studies::repositories::memory::InMemoryCaseStudyRepository;
    use crate::shared::test_helpers::with_admin_auth;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_admin_edits_case_study_in_place() {
        let service = Arc::new(CaseStudyService::new(Arc::new(
            InMemoryCaseStudyRepository::default(),
        )));
        let server = TestServer::builder()
            .build(with_admin_auth(routes(service)))
            .unwrap();

        let created: Value = server
            .post("/api/case-studies")
            .json(&json!({
                "title": "Turnaround",
                "slug": "turnaround",
                "summary": "s",
                "challenge": "c",
                "solution": "so",
                "results": "r",
                "clientType": "Manufacturing",
                "duration": "9 months",
                "keyOutcomes": ["Cut costs"]
            }))
            .await
            .json();
        let id = created["caseStudy"]["id"].as_str().unwrap().to_string();

        let updated: Value = server
            .put(&format!("/api/case-studies/{}", id))
            .json(&json!({ "title": "Plant turnaround", "published": true }))
            .await
            .json();
        assert_eq!(updated["caseStudy"]["title"], "Plant turnaround");
        assert_eq!(updated["caseStudy"]["clientType"], "Manufacturing");

        let response = server
            .put("/api/case-studies/turnaround")
            .json(&json!({ "title": "x" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["success"], false);
    }
}
