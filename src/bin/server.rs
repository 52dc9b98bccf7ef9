//! REST API server for Iranian identifier validation.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! persian-id-server
//!
//! # With custom address
//! persian-id-server --host 127.0.0.1 --port 8080
//! PERSIAN_ID_PORT=8080 persian-id-server
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use axum::{
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use persian_id::batch;
use persian_id::data::{Bank, Hometown};
use persian_id::{
    card_number, format, generate, national_id, normalize, CardNumberValidator,
    NationalIdValidator, ParseError, ValidatedCardNumber, ValidationError,
};

/// Upper bound on identifiers per batch or generate request.
const MAX_ITEMS: usize = 100;

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Persian ID API",
        version = "0.1.0",
        description = "Iranian national ID and bank card number validation REST API, with hometown and issuing bank lookup. No auth or rate limiting.",
        license(name = "MIT"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Card", description = "Bank card number validation and issuer lookup"),
        (name = "National ID", description = "National ID validation and parsing"),
        (name = "Text", description = "Persian and Arabic text normalization"),
        (name = "Generation", description = "Test identifier generation"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        validate_card,
        validate_card_batch,
        validate_national_id,
        parse_national_id,
        validate_national_id_batch,
        normalize_text,
        generate_identifiers,
        health,
    ),
    components(schemas(
        CardRequest,
        CardResponse,
        CardBatchRequest,
        CardBatchResponse,
        BankInfo,
        NationalIdRequest,
        NationalIdResponse,
        NationalIdBatchRequest,
        NationalIdBatchResponse,
        ParseResponse,
        HometownInfo,
        BatchSummary,
        ErrorResponse,
        NormalizeRequest,
        NormalizeResponse,
        IdentifierKind,
        GenerateRequest,
        GenerateResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_number": "6037701689095443"}))]
struct CardRequest {
    /// 16-digit card number. Persian and Arabic digits are accepted; separators are not.
    card_number: String,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "valid": true,
    "bin": "603770",
    "last_four": "5443",
    "masked": "****-****-****-5443",
    "bank": {"id": "keshavarzi", "name": "Keshavarzi", "persian_name": "بانک کشاورزی"}
}))]
struct CardResponse {
    /// Whether the card number passed format and checksum validation
    valid: bool,
    /// First 6 digits identifying the issuing bank
    #[serde(skip_serializing_if = "Option::is_none")]
    bin: Option<String>,
    /// Last 4 digits of the card number
    #[serde(skip_serializing_if = "Option::is_none")]
    last_four: Option<String>,
    /// Masked card number in format ****-****-****-1234 (safe for logging and display)
    #[serde(skip_serializing_if = "Option::is_none")]
    masked: Option<String>,
    /// Issuing bank, when the BIN is registered
    #[serde(skip_serializing_if = "Option::is_none")]
    bank: Option<BankInfo>,
    /// Human-readable error message explaining why validation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Error class: empty_input, format, blacklist or checksum
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<String>,
}

impl CardResponse {
    fn from_result(result: Result<ValidatedCardNumber, ValidationError>) -> Self {
        match result {
            Ok(card) => Self {
                valid: true,
                bank: persian_id::data::banks()
                    .find_by_bin(&card.bin())
                    .map(BankInfo::from),
                bin: Some(card.bin()),
                last_four: Some(card.last_four()),
                masked: Some(card.masked()),
                error: None,
                error_kind: None,
            },
            Err(e) => Self {
                valid: false,
                bin: None,
                last_four: None,
                masked: None,
                bank: None,
                error: Some(e.to_string()),
                error_kind: Some(e.kind().to_string()),
            },
        }
    }
}

#[derive(Serialize, ToSchema)]
struct BankInfo {
    /// Bank slug
    id: String,
    /// English name
    name: String,
    /// Persian name
    persian_name: String,
}

impl From<&Bank> for BankInfo {
    fn from(bank: &Bank) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            persian_name: bank.persian_name.clone(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"card_numbers": ["6037701689095443", "6219861034529008"]}))]
struct CardBatchRequest {
    /// Card numbers to validate (at most 100)
    card_numbers: Vec<String>,
}

#[derive(Serialize, ToSchema)]
struct CardBatchResponse {
    /// Validation results in request order
    results: Vec<CardResponse>,
    /// Summary statistics
    summary: BatchSummary,
}

#[derive(Serialize, ToSchema)]
struct BatchSummary {
    /// Total identifiers processed
    total: usize,
    /// Number of valid identifiers
    valid: usize,
    /// Number of invalid identifiers
    invalid: usize,
}

impl BatchSummary {
    fn count(flags: impl Iterator<Item = bool>) -> Self {
        let (mut total, mut valid) = (0, 0);
        for flag in flags {
            total += 1;
            valid += flag as usize;
        }
        Self {
            total,
            valid,
            invalid: total - valid,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"national_id": "۲۷۹۱۵۶۷۸۹۵"}))]
struct NationalIdRequest {
    /// National ID, 8 to 10 digits. Persian and Arabic digits are accepted.
    national_id: String,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({"valid": true, "national_id": "2791567895"}))]
struct NationalIdResponse {
    /// Whether the national ID passed all checks
    valid: bool,
    /// Canonical 10-digit form
    #[serde(skip_serializing_if = "Option::is_none")]
    national_id: Option<String>,
    /// Human-readable error message explaining why validation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Error class: empty_input, format, blacklist or checksum
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<String>,
}

impl NationalIdResponse {
    fn from_result(result: Result<String, ValidationError>) -> Self {
        match result {
            Ok(id) => Self {
                valid: true,
                national_id: Some(id),
                error: None,
                error_kind: None,
            },
            Err(e) => Self {
                valid: false,
                national_id: None,
                error: Some(e.to_string()),
                error_kind: Some(e.kind().to_string()),
            },
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"national_ids": ["2791567895", "0123456789", "68415941"]}))]
struct NationalIdBatchRequest {
    /// National IDs to validate (at most 100)
    national_ids: Vec<String>,
}

#[derive(Serialize, ToSchema)]
struct NationalIdBatchResponse {
    /// Validation results in request order
    results: Vec<NationalIdResponse>,
    /// Summary statistics
    summary: BatchSummary,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "national_id": "2791567895",
    "hometown_code": "279",
    "personal_code": "156789",
    "control_digit": 5,
    "hometowns": [{"province": "آذربایجان غربی", "city": "خوی"}]
}))]
struct ParseResponse {
    /// Canonical 10-digit form
    national_id: String,
    /// Digits 1 to 3
    hometown_code: String,
    /// Digits 4 to 9
    personal_code: String,
    /// The 10th digit
    control_digit: u8,
    /// Every hometown registered under the hometown code
    hometowns: Vec<HometownInfo>,
}

#[derive(Serialize, ToSchema)]
struct HometownInfo {
    /// Province name
    province: String,
    /// City name
    city: String,
}

impl From<&Hometown> for HometownInfo {
    fn from(hometown: &Hometown) -> Self {
        Self {
            province: hometown.province.clone(),
            city: hometown.city.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    /// Human-readable error message
    error: String,
    /// Error class: empty_input, format, blacklist, checksum or not_found
    error_kind: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString, error_kind: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            error_kind: error_kind.to_string(),
        }),
    )
}

fn too_many(count: usize) -> ApiError {
    api_error(
        StatusCode::BAD_REQUEST,
        format!("{} items requested, at most {} allowed", count, MAX_ITEMS),
        "format",
    )
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"text": "كد ملي ٢٧٩١٥٦٧٨٩٥"}))]
struct NormalizeRequest {
    /// Text to normalize
    text: String,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "ascii_digits": "كد ملي 2791567895",
    "persian": "کد ملی ۲۷۹۱۵۶۷۸۹۵",
    "is_persian": false
}))]
struct NormalizeResponse {
    /// Input with Persian and Arabic digits replaced by ASCII digits
    ascii_digits: String,
    /// Input with Arabic letter variants and digits replaced by Persian forms
    persian: String,
    /// Whether the input consists solely of Persian text
    is_persian: bool,
}

#[derive(Deserialize, Serialize, ToSchema, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
enum IdentifierKind {
    /// Bank card number
    Card,
    /// National ID
    NationalId,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"kind": "national-id", "prefix": "279", "count": 3}))]
struct GenerateRequest {
    /// Identifier kind: card or national-id
    kind: IdentifierKind,
    /// BIN (cards) or hometown code (national IDs). Random bundled value if omitted.
    #[serde(default)]
    prefix: Option<String>,
    /// Number of identifiers to generate (1-100, default: 1)
    #[serde(default = "default_count")]
    count: usize,
    /// Whether to format card numbers with spaces (e.g., "6037 7016 8909 5443")
    #[serde(default)]
    formatted: bool,
}

fn default_count() -> usize {
    1
}

#[derive(Serialize, ToSchema)]
struct GenerateResponse {
    /// Generated identifiers
    identifiers: Vec<String>,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
    /// Number of banks loaded
    banks: usize,
    /// Number of hometowns loaded
    hometowns: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Validate a card number and look up its bank
#[utoipa::path(
    post,
    path = "/card/validate",
    request_body = CardRequest,
    responses(
        (status = 200, description = "Validation result", body = CardResponse)
    ),
    tag = "Card"
)]
async fn validate_card(Json(req): Json<CardRequest>) -> Json<CardResponse> {
    Json(CardResponse::from_result(card_number::validate(
        &req.card_number,
    )))
}

/// Validate multiple card numbers
#[utoipa::path(
    post,
    path = "/card/validate/batch",
    request_body = CardBatchRequest,
    responses(
        (status = 200, description = "Batch validation results", body = CardBatchResponse),
        (status = 400, description = "Too many card numbers", body = ErrorResponse)
    ),
    tag = "Card"
)]
async fn validate_card_batch(
    Json(req): Json<CardBatchRequest>,
) -> Result<Json<CardBatchResponse>, ApiError> {
    if req.card_numbers.len() > MAX_ITEMS {
        return Err(too_many(req.card_numbers.len()));
    }

    let results: Vec<CardResponse> = batch::validate_all(&CardNumberValidator, &req.card_numbers)
        .into_iter()
        .map(CardResponse::from_result)
        .collect();

    Ok(Json(CardBatchResponse {
        summary: BatchSummary::count(results.iter().map(|r| r.valid)),
        results,
    }))
}

/// Validate a national ID
#[utoipa::path(
    post,
    path = "/national-id/validate",
    request_body = NationalIdRequest,
    responses(
        (status = 200, description = "Validation result", body = NationalIdResponse)
    ),
    tag = "National ID"
)]
async fn validate_national_id(Json(req): Json<NationalIdRequest>) -> Json<NationalIdResponse> {
    Json(NationalIdResponse::from_result(national_id::validate(
        &req.national_id,
    )))
}

/// Parse a national ID and resolve its hometowns
#[utoipa::path(
    post,
    path = "/national-id/parse",
    request_body = NationalIdRequest,
    responses(
        (status = 200, description = "Parsed national ID", body = ParseResponse),
        (status = 404, description = "No hometown registered for the prefix", body = ErrorResponse),
        (status = 422, description = "Invalid national ID", body = ErrorResponse)
    ),
    tag = "National ID"
)]
async fn parse_national_id(
    Json(req): Json<NationalIdRequest>,
) -> Result<Json<ParseResponse>, ApiError> {
    match national_id::parse(&req.national_id) {
        Ok(parsed) => Ok(Json(ParseResponse {
            national_id: parsed.id().to_string(),
            hometown_code: parsed.hometown_code().to_string(),
            personal_code: parsed.personal_code().to_string(),
            control_digit: parsed.control_digit(),
            hometowns: parsed.hometowns().iter().map(HometownInfo::from).collect(),
        })),
        Err(e @ ParseError::HometownNotFound { .. }) => {
            Err(api_error(StatusCode::NOT_FOUND, e, "not_found"))
        }
        Err(ParseError::Invalid(e)) => Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            &e,
            e.kind().as_str(),
        )),
    }
}

/// Validate multiple national IDs
#[utoipa::path(
    post,
    path = "/national-id/validate/batch",
    request_body = NationalIdBatchRequest,
    responses(
        (status = 200, description = "Batch validation results", body = NationalIdBatchResponse),
        (status = 400, description = "Too many national IDs", body = ErrorResponse)
    ),
    tag = "National ID"
)]
async fn validate_national_id_batch(
    Json(req): Json<NationalIdBatchRequest>,
) -> Result<Json<NationalIdBatchResponse>, ApiError> {
    if req.national_ids.len() > MAX_ITEMS {
        return Err(too_many(req.national_ids.len()));
    }

    let results: Vec<NationalIdResponse> =
        batch::validate_all(&NationalIdValidator, &req.national_ids)
            .into_iter()
            .map(NationalIdResponse::from_result)
            .collect();

    Ok(Json(NationalIdBatchResponse {
        summary: BatchSummary::count(results.iter().map(|r| r.valid)),
        results,
    }))
}

/// Normalize Persian and Arabic text
#[utoipa::path(
    post,
    path = "/normalize",
    request_body = NormalizeRequest,
    responses(
        (status = 200, description = "Normalized text", body = NormalizeResponse)
    ),
    tag = "Text"
)]
async fn normalize_text(Json(req): Json<NormalizeRequest>) -> Json<NormalizeResponse> {
    Json(NormalizeResponse {
        ascii_digits: normalize::to_ascii_digits(&req.text),
        persian: normalize::normalize_persian(&req.text),
        is_persian: normalize::is_persian_text(&req.text),
    })
}

/// Generate test identifiers
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated identifiers", body = GenerateResponse),
        (status = 400, description = "Invalid prefix or count", body = ErrorResponse)
    ),
    tag = "Generation"
)]
async fn generate_identifiers(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if req.count > MAX_ITEMS {
        return Err(too_many(req.count));
    }

    let mut rng = rand::thread_rng();
    let mut identifiers = Vec::with_capacity(req.count);
    for _ in 0..req.count {
        let prefix = match (&req.prefix, req.kind) {
            (Some(p), _) => Some(p.clone()),
            (None, IdentifierKind::Card) => generate::random_bin(&mut rng),
            (None, IdentifierKind::NationalId) => generate::random_hometown_code(&mut rng),
        }
        .ok_or_else(|| {
            api_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "reference data unavailable",
                "not_found",
            )
        })?;

        let generated = match req.kind {
            IdentifierKind::Card => generate::generate_card_number_with_rng(&prefix, &mut rng)
                .map(|card| {
                    if req.formatted {
                        format::format_card_number(&card)
                    } else {
                        card
                    }
                }),
            IdentifierKind::NationalId => {
                generate::generate_national_id_with_rng(&prefix, &mut rng)
            }
        };
        identifiers.push(
            generated.map_err(|e| api_error(StatusCode::BAD_REQUEST, &e, e.kind().as_str()))?,
        );
    }

    Ok(Json(GenerateResponse { identifiers }))
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        banks: persian_id::data::banks().len(),
        hometowns: persian_id::data::hometowns().len(),
    })
}

// ============================================================================
// Main
// ============================================================================

#[derive(Parser)]
#[command(name = "persian-id-server")]
#[command(author, version, about = "Iranian identifier validation REST API")]
struct Args {
    /// Address to bind
    #[arg(long, env = "PERSIAN_ID_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PERSIAN_ID_PORT", default_value_t = 3000)]
    port: u16,
}

fn app() -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/card/validate", post(validate_card))
        .route("/card/validate/batch", post(validate_card_batch))
        .route("/national-id/validate", post(validate_national_id))
        .route("/national-id/parse", post(parse_national_id))
        .route("/national-id/validate/batch", post(validate_national_id_batch))
        .route("/normalize", post(normalize_text))
        .route("/generate", post(generate_identifiers))
        .route("/health", get(health))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load reference data before accepting traffic.
    tracing::info!(
        banks = persian_id::data::banks().len(),
        hometowns = persian_id::data::hometowns().len(),
        "reference data ready"
    );

    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app()).await?;
    Ok(())
}
