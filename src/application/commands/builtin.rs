//! Built-in command handlers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rand::prelude::IndexedRandom;

use super::{Command, CommandContext, CommandRegistry};
use crate::application::errors::CommandError;

/// Reply sent by `!hello`.
pub const GREETING: &str = "Hello, world! Did I do good?";

/// Reply produced by the fallback handler for unrecognized commands.
pub const UNKNOWN_REPLY: &str = "Sorry, I do not have that command or you misspelled it :(";

const FORTUNES: [&str; 20] = [
    "It is certain",
    "It is decidedly so",
    "Without a doubt",
    "Yes definitely",
    "You may rely on it",
    "As I see it, yes",
    "Most likely",
    "Outlook good",
    "Yes",
    "Signs point to yes",
    "Reply hazy try again",
    "Ask again later",
    "Better not tell you now",
    "Cannot predict now",
    "Concentrate and ask again",
    "Don't count on it",
    "My reply is no",
    "My sources say no",
    "Outlook not so good",
    "Very doubtful",
];

/// Register every built-in command, in the order `!help` should list them.
///
/// `stop` is the dispatcher's cooperative stop flag, handed to `!shutdown`.
pub fn register_builtins(registry: &mut CommandRegistry, stop: Arc<AtomicBool>) {
    registry.register(Arc::new(Hello));
    registry.register(Arc::new(About));
    registry.register(Arc::new(Help));
    registry.register(Arc::new(Eightball));
    registry.register(Arc::new(Shutdown::new(stop)));
}

/// `!hello` - fixed greeting.
pub struct Hello;

#[async_trait]
impl Command for Hello {
    fn name(&self) -> &str {
        "!hello"
    }

    fn help(&self) -> String {
        "!hello - Returns a friendly hello world message".to_string()
    }

    async fn execute(
        &self,
        _ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<String, CommandError> {
        Ok(GREETING.to_string())
    }
}

/// `!about` - profile report of the account running the bot.
pub struct About;

#[async_trait]
impl Command for About {
    fn name(&self) -> &str {
        "!about"
    }

    fn help(&self) -> String {
        "!about - Returns information about the account running the bot".to_string()
    }

    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<String, CommandError> {
        let info = ctx.transport.account_info().await?;
        Ok(format!(
            "Name: {}\nDesc: {}\nFriends: {}\nCreated: {}\nVerified: {}\nURL: {}\nVersion: herald-bot-v{}",
            info.screen_name,
            info.description,
            info.friend_count,
            info.created_at,
            info.verified,
            info.url,
            env!("CARGO_PKG_VERSION"),
        ))
    }
}

/// `!help` - usage lines for all commands, or for the ones asked about.
pub struct Help;

#[async_trait]
impl Command for Help {
    fn name(&self) -> &str {
        "!help"
    }

    fn help(&self) -> String {
        "!help - Returns information about the commands the bot understands".to_string()
    }

    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        args: &[String],
    ) -> Result<String, CommandError> {
        let lines: Vec<String> = if args.is_empty() {
            ctx.registry.all().map(|cmd| cmd.help()).collect()
        } else {
            // Per-item degradation: unknown names get their own notice line,
            // in the order the sender asked.
            args.iter()
                .map(|arg| match ctx.registry.lookup(&arg.to_lowercase()) {
                    Some(cmd) => cmd.help(),
                    None => format!("{} is not a valid command", arg),
                })
                .collect()
        };
        Ok(lines.join("\n"))
    }
}

/// Fallback handler for commands the registry does not know.
pub struct Unknown;

#[async_trait]
impl Command for Unknown {
    fn name(&self) -> &str {
        "!error"
    }

    fn help(&self) -> String {
        "!error - Tells you the bot did not understand a command".to_string()
    }

    async fn execute(
        &self,
        _ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<String, CommandError> {
        Ok(UNKNOWN_REPLY.to_string())
    }
}

/// `!8ball` - one of twenty canned fortunes, chosen uniformly.
pub struct Eightball;

#[async_trait]
impl Command for Eightball {
    fn name(&self) -> &str {
        "!8ball"
    }

    fn help(&self) -> String {
        "!8ball - Returns an accurate prediction from the magical 8ball".to_string()
    }

    async fn execute(
        &self,
        _ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<String, CommandError> {
        let fortune = FORTUNES.choose(&mut rand::rng()).copied().unwrap_or(FORTUNES[0]);
        Ok(fortune.to_string())
    }
}

/// `!shutdown` - privileged; asks the dispatcher to stop after this batch.
pub struct Shutdown {
    stop: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self { stop }
    }
}

#[async_trait]
impl Command for Shutdown {
    fn name(&self) -> &str {
        "!shutdown"
    }

    fn help(&self) -> String {
        "!shutdown - Stops the bot (authorized users only)".to_string()
    }

    fn privileged(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        _args: &[String],
    ) -> Result<String, CommandError> {
        tracing::info!(sender = ctx.sender, "shutdown requested");
        self.stop.store(true, Ordering::SeqCst);
        Ok("Shutting down, goodbye!".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::TransportError;
    use crate::domain::entities::{AccountInfo, InboundMessage};
    use crate::domain::traits::{Ack, Transport};
    use chrono::{TimeZone, Utc};

    struct StubTransport;

    #[async_trait]
    impl Transport for StubTransport {
        async fn fetch_messages(
            &self,
            _since_id: Option<u64>,
        ) -> Result<Vec<InboundMessage>, TransportError> {
            Ok(Vec::new())
        }

        async fn send_reply(&self, _recipient: &str, _text: &str) -> Result<Ack, TransportError> {
            Ok(Ack {
                message_id: "stub".to_string(),
            })
        }

        async fn account_info(&self) -> Result<AccountInfo, TransportError> {
            Ok(AccountInfo {
                screen_name: "herald".to_string(),
                description: "a command bot".to_string(),
                friend_count: 42,
                created_at: Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap(),
                verified: false,
                url: "https://example.com/herald".to_string(),
            })
        }
    }

    fn test_registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry, Arc::new(AtomicBool::new(false)));
        registry
    }

    async fn run(registry: &CommandRegistry, name: &str, args: &[String]) -> String {
        let transport = StubTransport;
        let ctx = CommandContext {
            transport: &transport,
            registry,
            sender: "someone",
        };
        registry
            .lookup(name)
            .expect("command registered")
            .execute(&ctx, args)
            .await
            .expect("command succeeds")
    }

    #[tokio::test]
    async fn hello_returns_fixed_greeting() {
        let registry = test_registry();
        assert_eq!(run(&registry, "!hello", &[]).await, GREETING);
    }

    #[tokio::test]
    async fn about_formats_account_report() {
        let registry = test_registry();
        let reply = run(&registry, "!about", &[]).await;
        assert!(reply.starts_with("Name: herald\n"));
        assert!(reply.contains("Desc: a command bot\n"));
        assert!(reply.contains("Friends: 42\n"));
        assert!(reply.contains("Verified: false\n"));
        assert!(reply.contains("URL: https://example.com/herald\n"));
        assert!(reply.ends_with(&format!("Version: herald-bot-v{}", env!("CARGO_PKG_VERSION"))));
    }

    #[tokio::test]
    async fn help_without_args_lists_every_command_in_registration_order() {
        let registry = test_registry();
        let reply = run(&registry, "!help", &[]).await;
        let lines: Vec<&str> = reply.lines().collect();

        let expected: Vec<String> = registry.all().map(|cmd| cmd.help()).collect();
        assert_eq!(lines.len(), registry.len());
        assert_eq!(lines, expected);
    }

    #[tokio::test]
    async fn help_with_known_name_returns_that_help_line() {
        let registry = test_registry();
        let reply = run(&registry, "!help", &["!hello".to_string()]).await;
        assert_eq!(reply, Hello.help());
    }

    #[tokio::test]
    async fn help_with_unknown_name_degrades_per_item() {
        let registry = test_registry();
        let args = vec!["!bogus".to_string(), "!8ball".to_string()];
        let reply = run(&registry, "!help", &args).await;
        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(lines[0], "!bogus is not a valid command");
        assert_eq!(lines[1], Eightball.help());
    }

    #[tokio::test]
    async fn eightball_always_answers_from_the_fixed_list() {
        let registry = test_registry();
        for _ in 0..200 {
            let reply = run(&registry, "!8ball", &[]).await;
            assert!(FORTUNES.contains(&reply.as_str()), "unexpected fortune: {}", reply);
        }
    }

    #[tokio::test]
    async fn shutdown_sets_the_stop_flag() {
        let stop = Arc::new(AtomicBool::new(false));
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry, Arc::clone(&stop));

        run(&registry, "!shutdown", &[]).await;
        assert!(stop.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_fallback_returns_fixed_reply() {
        let registry = test_registry();
        let transport = StubTransport;
        let ctx = CommandContext {
            transport: &transport,
            registry: &registry,
            sender: "someone",
        };
        let reply = registry
            .fallback()
            .execute(&ctx, &[])
            .await
            .expect("fallback succeeds");
        assert_eq!(reply, UNKNOWN_REPLY);
    }

    #[test]
    fn lookup_of_unregistered_name_is_none() {
        let registry = test_registry();
        assert!(registry.lookup("!bogus").is_none());
    }

    #[test]
    fn reregistering_overwrites_but_keeps_slot() {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry, Arc::new(AtomicBool::new(false)));
        let before: Vec<String> = registry.all().map(|c| c.name().to_string()).collect();

        registry.register(Arc::new(Hello));
        let after: Vec<String> = registry.all().map(|c| c.name().to_string()).collect();

        assert_eq!(before, after);
        assert_eq!(registry.len(), before.len());
    }
}
