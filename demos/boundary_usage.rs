use apperr::signals::DeadlineExceeded;
use apperr::{
    Boundary, BoundaryConfig, Classifier, Failure, Result, ValidationError, definitions,
};
use http::{HeaderMap, HeaderValue};
use std::sync::Arc;

// A repository call that fails in the driver.
fn find_order(id: u64) -> Result<String> {
    let driver = std::io::Error::new(std::io::ErrorKind::NotFound, "no rows in result set");
    Err(Failure::wrap_with_code(driver, definitions::SQL_RECORD_DOES_NOT_EXIST, format!("find order {id}"))
        .with_metadata("table", "orders"))
}

// A downstream call that ran out of time.
fn charge_card() -> Result<()> {
    Err(Failure::wrap_with_code(DeadlineExceeded, definitions::HTTP_CLIENT_ERROR_ON_REQUEST, "charge card"))
}

fn print_reply(title: &str, reply: &apperr::Reply) {
    println!("--- {title} ---");
    println!("   status:       {}", reply.status());
    println!("   content-type: {}", reply.content_type());
    match reply.to_body_bytes() {
        Ok(bytes) => println!("   body:         {}\n", String::from_utf8_lossy(&bytes)),
        Err(err) => println!("   body:         <unserializable: {err}>\n"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let boundary = Boundary::new(Arc::new(Classifier::standard()), BoundaryConfig::default());

    // 1. Plain request, English, no debug output.
    let meta = boundary.request_meta(&HeaderMap::new());
    if let Err(err) = find_order(42) {
        print_reply("not found (en)", &boundary.respond(err, &meta, &[]));
    }

    // 2. Indonesian client with debug authorized.
    let mut headers = HeaderMap::new();
    headers.insert("x-app-lang", HeaderValue::from_static("id"));
    headers.insert("x-app-debug", HeaderValue::from_static("true"));
    let meta = boundary.request_meta(&headers);
    if let Err(err) = find_order(7) {
        print_reply("not found (id, debug)", &boundary.respond(err, &meta, &[]));
    }

    // 3. Validation failure with per-field details.
    let problems = [
        ValidationError::new("email", "must contain @").to_string(),
        ValidationError::new("age", "must be >= 0").to_string(),
    ];
    let details: Vec<&str> = problems.iter().map(String::as_str).collect();
    let err = Failure::with_code(definitions::HTTP_BAD_REQUEST, "validate signup");
    print_reply("validation", &boundary.respond(err, &meta, &details));

    // 4. Deadline at the root: re-attributed to a timeout.
    if let Err(err) = charge_card() {
        print_reply("deadline", &boundary.respond(err, &meta, &[]));
    }
}
