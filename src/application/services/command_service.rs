use crate::application::errors::CommandError;
use crate::domain::entities::{Action, Command, CommandRegistry, Content, Keyboard, Message, Reply, Service};

/// Keyboard with one `<action> <service>` button per service, two per row
pub fn service_keyboard(action: Action) -> Keyboard {
    let rows: Vec<Vec<String>> = Service::ALL
        .chunks(2)
        .map(|pair| pair.iter().map(|s| format!("{} {}", action, s)).collect::<Vec<_>>())
        .collect();
    Keyboard::new(rows)
}

/// Service for managing and executing slash commands
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        self.register(Command::new("start")
            .with_description("Start the bot")
            .with_handler(|_| {
                Ok(Reply::text("Please choose the service where you want to find a family:")
                    .with_keyboard(service_keyboard(Action::Join)))
            }));

        self.register(Command::new("join")
            .with_description("Join a family waitlist")
            .with_handler(|_| {
                Ok(Reply::text("Choose the service you want to join:")
                    .with_keyboard(service_keyboard(Action::Join).one_time()))
            }));

        self.register(Command::new("leave")
            .with_description("Leave a family waitlist")
            .with_handler(|_| {
                Ok(Reply::text("Choose the service family you want to leave:")
                    .with_keyboard(service_keyboard(Action::Leave).one_time()))
            }));

        // Answered by get_help, which needs the registry
        self.register(Command::new("help")
            .with_description("Show help message")
            .with_usage("/help [command]"));

        self.register(Command::new("version")
            .with_description("Show bot version")
            .with_handler(|_| {
                Ok(Reply::text(format!("families-bot v{}", env!("CARGO_PKG_VERSION"))))
            }));
    }

    pub fn handle(&self, message: &Message) -> Result<Option<Reply>, CommandError> {
        let Content::Command { name, args } = &message.content else {
            return Ok(None);
        };

        let cmd = self.registry.find(name)
            .ok_or_else(|| CommandError::NotFound(name.clone()))?;

        if cmd.name == "help" {
            return Ok(Some(Reply::text(self.get_help(args.first().map(String::as_str)))));
        }

        match &cmd.handler {
            Some(handler) => Ok(Some(handler(message)?)),
            None => Ok(Some(Reply::text(format!("Command {} not implemented", cmd.name)))),
        }
    }

    pub fn get_help(&self, command: Option<&str>) -> String {
        if let Some(name) = command {
            if let Some(cmd) = self.registry.get(name) {
                let mut help = format!("{}{} - {}", self.prefix, cmd.name, cmd.description.as_deref().unwrap_or("No description"));
                if let Some(usage) = &cmd.usage {
                    help.push_str(&format!("\nUsage: {}", usage));
                }
                return help;
            }
            return format!("Command {}{} not found", self.prefix, name);
        }

        let mut help = "Available commands:\n".to_string();
        for cmd in self.registry.all() {
            help.push_str(&format!("  {}{} - {}\n", self.prefix, cmd.name, cmd.description.as_deref().unwrap_or("")));
        }
        help.push_str("\nOr send \"Join <service>\" / \"Leave <service>\", where <service> is one of: ");
        help.push_str(&Service::ALL.iter().map(|s| s.name()).collect::<Vec<_>>().join(", "));
        help
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registered commands as `(name, description)`, for platform menus
    pub fn menu(&self) -> Vec<(String, String)> {
        self.registry
            .all()
            .into_iter()
            .map(|c| (c.name.clone(), c.description.clone().unwrap_or_default()))
            .collect()
    }
}
