use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::db::User;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(flatten)]
    pub user: User,
    pub preferred_champions: Vec<String>,
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(riot_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .repo
        .get_user_by_riot_id(&riot_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let preferred_champions = user.preferred_champions();
    Ok(Json(UserResponse {
        user,
        preferred_champions,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use httpmock::MockServer;

    use crate::db::NewUser;
    use crate::routes::test_support::{get_json, test_app};

    #[tokio::test]
    async fn user_lookup_decodes_champions() {
        let server = MockServer::start_async().await;
        let (app, state) = test_app(&server).await;
        state
            .repo
            .upsert_user(&NewUser {
                riot_id: "Not Alet".into(),
                tag_line: "JCP".into(),
                region: "las".into(),
                puuid: Some("p-1".into()),
                rank_tier: Some("PLATINUM".into()),
                rank_division: Some("IV".into()),
                league_points: 91,
                preferred_jungle_champions: vec!["Graves".into(), "Viego".into()],
            })
            .await
            .unwrap();

        let (status, body) = get_json(app.clone(), "/api/v1/users/Not%20Alet").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tag_line"], "JCP");
        assert_eq!(body["preferred_champions"][1], "Viego");

        let (status, _) = get_json(app, "/api/v1/users/ghost").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
