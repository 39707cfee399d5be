//! Debug script to see what the converter and renderer produce.
//!
//! `RUST_LOG=hexport_compiler=debug cargo run --bin debug_convert`

use std::path::Path;

use hexport_compiler::codegen::{render_unit, RenderOptions};
use hexport_compiler::frontend::create_frontend;
use hexport_compiler::validate::validate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hexport_compiler=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() {
    init_logger();

    let source = r#"
package com.acme.users

import cats.effect.IO

case class UserId(value: String) extends AnyVal

case class User(id: UserId, email: String, nickname: Option[String])

sealed trait UserEvent
case class Registered(id: UserId, at: java.time.Instant) extends UserEvent
case object Purged extends UserEvent

trait UserRepository {
  def find(id: UserId): IO[Option[User]]
  def save(user: User): IO[Unit]
}

class RegisterUserService(users: UserRepository, clock: java.time.Clock) {
  def register(email: String): IO[User] = ???
}

class DoobieUserRepository(xa: Transactor[IO]) extends UserRepository {
  def find(id: UserId): IO[Option[User]] = ???
  def save(user: User): IO[Unit] = ???
}
"#;

    let mut frontend = create_frontend("scala").unwrap();
    let tree = frontend.parse(source, Path::new("Users.scala")).unwrap();
    println!("Declarations: {}", tree.declarations.len());

    match frontend.convert(&tree, "Users.scala") {
        Ok(output) => {
            println!("\nIR:\n{}", serde_json::to_string_pretty(&output).unwrap());

            let result = validate(&output.domain_models, &output.interfaces);
            println!("\nValidation (valid: {}):", result.is_valid());
            for issue in result.errors.iter().chain(&result.warnings) {
                println!("  {}", issue);
            }

            println!("\nKotlin:\n{}", render_unit(&output, &RenderOptions::default()));
        }
        Err(e) => {
            println!("Error: {:?}", e);
        }
    }
}
