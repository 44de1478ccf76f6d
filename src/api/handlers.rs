use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::value::RawValue;
use tracing::{debug, info, instrument};

use crate::api::{AppState, Envelope, Failure};
use crate::dynamodb::{Item, Value};

type Body = Result<Bytes, BytesRejection>;

/// `{table, key, value}`
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub key: String,
    pub value: Value,
}

/// `{table, data: {...}}`; `data` is kept raw and decoded as an item.
#[derive(Debug, Deserialize)]
pub struct PutRequest {
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}

fn decode_body<T: DeserializeOwned>(body: Body) -> Result<T, Failure> {
    let bytes = body.map_err(|e| Failure::decode("Error parsing body to bytes", e))?;
    serde_json::from_slice(&bytes).map_err(|e| Failure::decode("Error unmarshaling data", e))
}

fn require(field: &str, message: &str) -> Result<(), Failure> {
    if field.trim().is_empty() {
        return Err(Failure::validation(message));
    }
    Ok(())
}

/// `POST /dynamo/test`
#[instrument(skip_all)]
pub async fn ping() -> Response {
    Envelope::ok().into_response()
}

/// `POST /dynamo/tables`: table names keyed by position.
#[instrument(skip_all)]
pub async fn tables(State(state): State<AppState>) -> Response {
    let result = list_tables(&state).await;
    state.respond(result).await
}

async fn list_tables(state: &AppState) -> Result<Envelope<BTreeMap<String, String>>, Failure> {
    let tables = state
        .store
        .list_tables()
        .await
        .map_err(|e| Failure::store("Error retrieving tables list", e))?;

    info!("Tables: {}", tables.join(", "));

    let data = tables
        .into_iter()
        .enumerate()
        .map(|(i, name)| (i.to_string(), name))
        .collect();
    Ok(Envelope::with_data(data))
}

/// `POST /dynamo/describe`: logs the description of every table.
#[instrument(skip_all)]
pub async fn describe(State(state): State<AppState>) -> Response {
    let result = describe_tables(&state).await;
    state.respond(result).await
}

async fn describe_tables(state: &AppState) -> Result<Envelope, Failure> {
    let tables = state
        .store
        .list_tables()
        .await
        .map_err(|e| Failure::store("Error retrieving tables list", e))?;

    for name in tables {
        let table = state
            .store
            .describe_table(&name)
            .await
            .map_err(|e| Failure::store(format!("Error describe table {name}"), e))?;

        info!(
            status = table.status.as_deref().unwrap_or("UNKNOWN"),
            item_count = table.item_count.unwrap_or_default(),
            "Table '{}' key schema: {:?}",
            table.name,
            table.key_schema
        );
    }

    Ok(Envelope::ok())
}

/// `POST /dynamo/item`: the item, or `{}` when there is none.
#[instrument(skip_all)]
pub async fn get_item(State(state): State<AppState>, body: Body) -> Response {
    let result = fetch_item(&state, body).await;
    state.respond(result).await
}

async fn fetch_item(state: &AppState, body: Body) -> Result<Envelope<Item>, Failure> {
    let request: ItemRequest = decode_body(body)?;
    if state.dev {
        debug!(?request, "input");
    }

    require(&request.table, "Missing table name")?;
    require(&request.key, "Missing item key")?;
    if !request.value.is_key_scalar() {
        return Err(Failure::validation(
            "Item key value must be a string or a number",
        ));
    }

    let key_value = request
        .value
        .to_attribute_value()
        .map_err(|e| Failure::codec("Error marshalling key", e))?;

    let found = state
        .store
        .get_item(&request.table, &request.key, key_value)
        .await
        .map_err(|e| Failure::store("Error retrieving item", e))?;

    let item = match found {
        Some(attributes) => Item::from_attributes(attributes)
            .map_err(|e| Failure::codec("Error mapping to item", e))?,
        None => Item::new(),
    };

    if state.dev {
        debug!(?item, "retrieved item");
    }
    Ok(Envelope::with_data(item))
}

/// `POST /dynamo/put`: writes (or replaces) one item.
#[instrument(skip_all)]
pub async fn put_item(State(state): State<AppState>, body: Body) -> Response {
    let result = store_item(&state, body).await;
    state.respond(result).await
}

async fn store_item(state: &AppState, body: Body) -> Result<Envelope, Failure> {
    let request: PutRequest = decode_body(body)?;
    let item = match &request.data {
        Some(data) => Item::decode(data.get().as_bytes())
            .map_err(|e| Failure::decode("Error unmarshaling data", e))?,
        None => Item::new(),
    };

    require(&request.table, "Missing table name")?;
    if item.is_empty() {
        return Err(Failure::validation("Missing item data"));
    }

    let attributes = item
        .to_attributes()
        .map_err(|e| Failure::codec("Error marshalling item", e))?;

    state
        .store
        .put_item(&request.table, attributes)
        .await
        .map_err(|e| Failure::store("Error putting item", e))?;

    if state.dev {
        debug!(?item, "putted item into '{}'", request.table);
    }
    Ok(Envelope::ok())
}
