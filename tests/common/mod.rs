//! Common test utilities: temp dirs, environment isolation and a tiny HTTP fixture

use std::env;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use tempfile::TempDir;

use reachprobe::config::{CONFIG_PATH_ENV_VAR, TIMEOUT_ENV_VAR, URL_ENV_VAR};
use reachprobe::core::debug_logger::DEBUG_ENV_VAR;
use reachprobe::core::probe::ProbeOptions;

/// Test helper to create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Probe options for talking to local fixtures: short timeout, no proxy
pub fn local_options() -> ProbeOptions {
    ProbeOptions {
        timeout: std::time::Duration::from_secs(3),
        use_proxy: false,
        ..ProbeOptions::default()
    }
}

const ISOLATED_VARS: [&str; 4] = [CONFIG_PATH_ENV_VAR, URL_ENV_VAR, TIMEOUT_ENV_VAR, DEBUG_ENV_VAR];

/// Clears reachprobe environment variables and restores them on drop
///
/// Tests using this must be `#[serial]`.
pub struct IsolatedEnv {
    saved: Vec<(&'static str, Option<String>)>,
}

impl IsolatedEnv {
    pub fn new() -> Self {
        let saved = ISOLATED_VARS
            .iter()
            .chain(std::iter::once(&"HOME"))
            .map(|name| (*name, env::var(name).ok()))
            .collect();
        for name in ISOLATED_VARS {
            env::remove_var(name);
        }
        Self { saved }
    }

    pub fn set(&self, name: &str, value: &str) {
        env::set_var(name, value);
    }

    pub fn set_temp_home(&self, temp_dir: &std::path::Path) {
        env::set_var("HOME", temp_dir);
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
}

/// Request as seen by the fixture server
#[derive(Debug, Clone)]
pub struct FixtureRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl FixtureRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Minimal HTTP/1.1 server answering each connection with the handler's raw response
pub struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&FixtureRequest) -> String + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind fixture server");
        let addr = listener.local_addr().expect("Fixture server has no address");

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let Some(request) = read_request(&stream) else { continue };
                let response = handler(&request);
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { addr }
    }

    /// Server that accepts connections and never answers
    pub fn start_silent() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind fixture server");
        let addr = listener.local_addr().expect("Fixture server has no address");

        thread::spawn(move || {
            let mut held: Vec<TcpStream> = Vec::new();
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => held.push(stream),
                    Err(_) => break,
                }
            }
        });

        Self { addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// URL of a local port with nothing listening on it
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("Probe port has no address");
    drop(listener);
    format!("http://{}/", addr)
}

fn read_request(stream: &TcpStream) -> Option<FixtureRequest> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) if line.trim_end().is_empty() => break,
            Ok(_) => {
                if let Some((name, value)) = line.trim_end().split_once(':') {
                    headers.push((name.trim().to_string(), value.trim().to_string()));
                }
            }
            Err(_) => break,
        }
    }

    Some(FixtureRequest {
        method,
        path,
        headers,
    })
}

/// Build a raw `Connection: close` HTTP/1.1 response
pub fn http_response(status_line: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status_line,
        body.len()
    );
    for (name, value) in headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("\r\n");
    response.push_str(body);
    response
}
