//! 控制台命令
//!
//! 每行一条命令：`VERB PATH [JSON]`、`login <user> <password>`、`logout`、`whoami`。
//! 每条命令输出一个 JSON 值：成功信封或拒绝。

use serde_json::{Value, json};

use crate::api::app_state::AppState;
use crate::api::request::{Request, Verb};
use crate::error::{AppError, Result};

/// 控制台命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Request(Request),
    Login { login: String, password: String },
    Logout,
    WhoAmI,
    Metrics,
}

impl Command {
    /// 解析一行输入，空行返回 `None`
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (head, rest) = next_token(line);

        let command = match head.to_ascii_lowercase().as_str() {
            "login" => {
                let (login, password) = next_token(rest);
                if login.is_empty() || password.is_empty() {
                    return Err(usage("login <user> <password>"));
                }
                Command::Login {
                    login: login.to_string(),
                    password: password.to_string(),
                }
            }
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "metrics" => Command::Metrics,
            _ => {
                let verb: Verb = head.parse()?;
                let (path, body) = next_token(rest);
                if !path.starts_with('/') {
                    return Err(usage("VERB /path [json]"));
                }
                let mut request = Request::new(verb, path);
                if !body.is_empty() {
                    request = request.with_body(serde_json::from_str(body)?);
                }
                Command::Request(request)
            }
        };

        Ok(Some(command))
    }
}

/// 拆出第一个词，余下部分去掉首尾空白
fn next_token(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim()),
        None => (input, ""),
    }
}

fn usage(form: &str) -> AppError {
    AppError::Internal(format!("usage: {}", form))
}

/// 执行命令，返回要打印的 JSON
pub async fn execute(state: &AppState, command: Command) -> Value {
    let outcome = match command {
        Command::Request(request) => state
            .client
            .send(request)
            .await
            .and_then(|envelope| Ok(serde_json::to_value(envelope)?)),
        Command::Login { login, password } => state
            .auth
            .login(&login, &password)
            .await
            .and_then(|identity| Ok(serde_json::to_value(identity)?)),
        Command::Logout => state
            .auth
            .logout()
            .map(|_| json!({ "status": state.sessions.status() })),
        Command::WhoAmI => match state.sessions.identity() {
            Some(identity) => serde_json::to_value(identity).map_err(AppError::from),
            None => Ok(json!({ "status": state.sessions.status() })),
        },
        Command::Metrics => {
            serde_json::to_value(state.metrics.snapshot()).map_err(AppError::from)
        }
    };

    outcome.unwrap_or_else(|err| {
        serde_json::to_value(err.to_response())
            .unwrap_or_else(|_| json!({ "message": err.to_string() }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_lines() {
        let command = Command::parse(r#"post /courses {"title": "Rust"}"#).unwrap().unwrap();
        let Command::Request(request) = command else {
            panic!("expected request");
        };
        assert_eq!(request.verb, Verb::Post);
        assert_eq!(request.path, "/courses");
        assert_eq!(request.body, Some(json!({"title": "Rust"})));

        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("whoami").unwrap(), Some(Command::WhoAmI));
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(Command::parse("login admin").is_err());
        assert!(Command::parse("GET courses").is_err());
        assert!(Command::parse("PATCH /courses").is_err());
        assert!(Command::parse("POST /courses {oops").is_err());
    }

    #[tokio::test]
    async fn test_login_then_whoami() {
        let state = AppState::testing().unwrap();
        let login = Command::parse("login admin@gmail.com admin123").unwrap().unwrap();
        assert_eq!(execute(&state, login).await["id"], "admin-123");
        assert_eq!(execute(&state, Command::WhoAmI).await["role"], "ADMIN");

        let lookup = Command::parse("GET /courses/none-such-course").unwrap().unwrap();
        let rejected = execute(&state, lookup).await;
        assert_eq!(rejected["status"], 404);

        execute(&state, Command::Logout).await;
        assert_eq!(execute(&state, Command::WhoAmI).await["status"], "LoggedOut");
    }
}
