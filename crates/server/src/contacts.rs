use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use service::contacts::store::ContactStore;

/// Shared handler state; the store is constructed at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
}

#[derive(Debug, Deserialize)]
pub struct AddParams {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct GetParams {
    pub name: String,
}

/// Insert or overwrite a contact. Re-adding a name replaces its phone number.
pub async fn add_contact(
    State(state): State<AppState>,
    Query(params): Query<AddParams>,
) -> String {
    state.store.add(params.name.clone(), params.phone).await;
    format!("Contact {} added successfully!", params.name)
}

/// Look up one contact; a miss is reported in the body, not the status code.
pub async fn get_contact(
    State(state): State<AppState>,
    Query(params): Query<GetParams>,
) -> String {
    match state.store.get(&params.name).await {
        Some(phone) => format!("{}'s phone number is {}", params.name, phone),
        None => format!("No contact found for {}", params.name),
    }
}

/// Dump the complete name -> phone mapping.
pub async fn all_contacts(State(state): State<AppState>) -> Json<HashMap<String, String>> {
    Json(state.store.all().await)
}
