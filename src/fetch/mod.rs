// src/fetch/mod.rs

use std::future::Future;

use reqwest::{Client, Proxy};
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{Result, WatchError};

pub mod form;

pub use form::search_form;

/// Somewhere the results page comes from.
pub trait PageSource {
    fn fetch_page(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Posts the timetable search form to the registrar.
#[derive(Debug, Clone)]
pub struct Registrar {
    client: Client,
    url: Url,
    form: Vec<(&'static str, String)>,
}

impl Registrar {
    pub fn new(client: Client, config: &Config) -> Self {
        Registrar {
            client,
            url: config.registrar_url.clone(),
            form: search_form(&config.dept, &config.term),
        }
    }
}

impl PageSource for Registrar {
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    async fn fetch_page(&self) -> Result<String> {
        let resp = self
            .client
            .post(self.url.clone())
            .form(&self.form)
            .send()
            .await
            .map_err(|e| WatchError::transport(format!("POST {}", self.url), e))?;
        let status = resp.status();
        debug!(%status, "registrar responded");

        let body = resp
            .error_for_status()
            .map_err(|e| WatchError::transport(format!("non-success status from {}", self.url), e))?
            .text()
            .await
            .map_err(|e| WatchError::transport(format!("reading body from {}", self.url), e))?;
        info!(bytes = body.len(), "fetched results page");
        Ok(body)
    }
}

/// HTTP client for the whole process; routes HTTP and HTTPS through the proxy
/// when one is configured.
pub fn build_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(proxy) = &config.proxy_url {
        debug!(proxy = %proxy.host_str().unwrap_or_default(), "using proxy");
        let proxy = Proxy::all(proxy.clone())
            .map_err(|e| WatchError::transport("configuring proxy", e))?;
        builder = builder.proxy(proxy);
    }
    builder
        .build()
        .map_err(|e| WatchError::transport("building HTTP client", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmailConfig;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(registrar_url: &str) -> Config {
        Config {
            registrar_url: Url::parse(registrar_url).unwrap(),
            term: "202409".into(),
            dept: "COSC".into(),
            target_crn: "91714".into(),
            proxy_url: None,
            email: EmailConfig {
                api_base: Url::parse("http://localhost/").unwrap(),
                api_key: "re_test".into(),
                from: "watch@example.com".into(),
                to: "student@example.com".into(),
            },
        }
    }

    #[tokio::test]
    async fn posts_search_form_with_repeated_selections() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/timetable.display_courses"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("depts=no_value&depts=COSC"))
            .and(body_string_contains("terms=no_value&terms=202409"))
            .and(body_string_contains("searchtype=Subject+Area%28s%29"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let cfg = config(&format!("{}/timetable.display_courses", server.uri()));
        let registrar = Registrar::new(build_client(&cfg).unwrap(), &cfg);
        assert_eq!(registrar.fetch_page().await.unwrap(), "<html>ok</html>");
    }

    #[tokio::test]
    async fn server_error_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let cfg = config(&format!("{}/timetable.display_courses", server.uri()));
        let registrar = Registrar::new(Client::new(), &cfg);
        let err = registrar.fetch_page().await.unwrap_err();
        assert!(matches!(err, WatchError::Transport { .. }), "got {}", err);
    }

    #[test]
    fn client_builds_with_proxy() {
        let cfg = Config {
            proxy_url: Some(Url::parse("http://proxy.local:3128").unwrap()),
            ..config("http://registrar.local/search")
        };
        assert!(build_client(&cfg).is_ok());
    }
}
