use proxyfetch_client::prelude::{HeaderValue, Method, Url};
use proxyfetch_client::{Credentials, RequestBuilder, build_request};

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[test]
fn test_credentials_become_basic_proxy_authorization() {
    let credentials = Credentials::new("alice", "s3cret");
    let request = build_request(&url("https://example.test/"), Some(&credentials)).unwrap();

    assert_eq!(*request.method(), Method::GET);
    assert_eq!(
        request.headers().get("proxy-authorization").unwrap(),
        "Basic YWxpY2U6czNjcmV0"
    );
}

#[test]
fn test_no_credentials_no_header() {
    let request = build_request(&url("https://example.test/"), None).unwrap();
    assert!(request.headers().get("proxy-authorization").is_none());
}

#[test]
fn test_default_headers() {
    let request = RequestBuilder::new(url("http://example.test:8080/a"))
        .user_agent("custom/1.0")
        .build()
        .unwrap();

    assert_eq!(request.headers().get("host").unwrap(), "example.test:8080");
    assert_eq!(request.headers().get("user-agent").unwrap(), "custom/1.0");
    assert_eq!(request.headers().get("accept").unwrap(), "*/*");
    assert!(!request.is_tunneled());
}

#[test]
fn test_extra_headers_override_defaults_but_not_credentials() {
    let credentials = Credentials::new("alice", "s3cret");
    let request = RequestBuilder::new(url("https://example.test/"))
        .credentials(Some(&credentials))
        .try_header("Accept", "text/html")
        .unwrap()
        .try_header("Proxy-Authorization", "Basic Zm9vOmJhcg==")
        .unwrap()
        .header(
            "x-trace".parse().unwrap(),
            HeaderValue::from_static("abc"),
        )
        .build()
        .unwrap();

    assert_eq!(request.headers().get("accept").unwrap(), "text/html");
    assert_eq!(request.headers().get("x-trace").unwrap(), "abc");
    assert_eq!(
        request.headers().get("proxy-authorization").unwrap(),
        "Basic YWxpY2U6czNjcmV0"
    );
    assert!(request.is_tunneled());
}

#[test]
fn test_invalid_extra_header_is_config_error() {
    let err = RequestBuilder::new(url("https://example.test/"))
        .try_header("bad header", "x")
        .unwrap_err();
    assert!(err.is_config());
}
