use std::sync::Arc;

use birthday_types::Announcement;
use serenity::all::{
    ChannelId, ChannelType, Client, Command as SlashCommand, CommandInteraction,
    CommandOptionType, Context, CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, EventHandler,
    GatewayIntents, GuildId, Http, Interaction, Permissions, Ready, ResolvedValue,
};

use crate::commands::{self, Command, Invocation, Reply};
use crate::context::AppContext;
use crate::error::{BotError, Result};

/// Discord's per-message character limit
const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Slash command definitions registered with Discord
pub fn command_definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(commands::ADD_BIRTHDAY)
            .description("Add a birthday for a user (MM/DD format)")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Whose birthday it is")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "birthday",
                    "Date as MM/DD, e.g. 01/31",
                )
                .required(true),
            ),
        CreateCommand::new(commands::REMOVE_BIRTHDAY)
            .description("Remove a birthday entry (your own when no name is given)")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "username",
                    "The display name of the person whose birthday to remove",
                )
                .required(false),
            ),
        CreateCommand::new(commands::LIST_BIRTHDAYS).description("Show all birthdays."),
        CreateCommand::new(commands::INIT_DEFAULT_BIRTHDAYS)
            .description("[Admin Only] Initialize the birthday list.")
            .default_member_permissions(Permissions::ADMINISTRATOR),
        CreateCommand::new(commands::SET_NOTIFICATION_CHANNEL)
            .description("[Admin Only] Choose where birthday announcements are posted")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .dm_permission(false)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel for birthday announcements",
                )
                .channel_types(vec![ChannelType::Text, ChannelType::News])
                .required(true),
            ),
    ]
}

/// Translate a slash command interaction into a platform-independent command
fn parse_interaction(interaction: &CommandInteraction) -> Option<Command> {
    let options = interaction.data.options();

    match interaction.data.name.as_str() {
        commands::ADD_BIRTHDAY => {
            let mut target = None;
            let mut date = None;
            for option in options {
                match (option.name, option.value) {
                    ("user", ResolvedValue::User(user, member)) => {
                        // Server nickname first, then global display name, then username
                        let display_name = member
                            .and_then(|m| m.nick.clone())
                            .or_else(|| user.global_name.clone())
                            .unwrap_or_else(|| user.name.clone());
                        target = Some((user.id.to_string(), display_name));
                    }
                    ("birthday", ResolvedValue::String(text)) => date = Some(text.to_string()),
                    _ => {}
                }
            }
            let (user_id, display_name) = target?;
            Some(Command::AddBirthday {
                user_id,
                display_name,
                date: date?,
            })
        }
        commands::REMOVE_BIRTHDAY => {
            let name = options.into_iter().find_map(|option| match option.value {
                ResolvedValue::String(text) if option.name == "username" => Some(text.to_string()),
                _ => None,
            });
            Some(Command::RemoveBirthday { name })
        }
        commands::LIST_BIRTHDAYS => Some(Command::ListBirthdays),
        commands::INIT_DEFAULT_BIRTHDAYS => Some(Command::InitDefaultBirthdays),
        commands::SET_NOTIFICATION_CHANNEL => {
            options.into_iter().find_map(|option| match option.value {
                ResolvedValue::Channel(channel) if option.name == "channel" => {
                    Some(Command::SetNotificationChannel {
                        channel_id: channel.id.to_string(),
                    })
                }
                _ => None,
            })
        }
        _ => None,
    }
}

fn invocation_for(interaction: &CommandInteraction) -> Invocation {
    let is_admin = interaction
        .member
        .as_ref()
        .and_then(|m| m.permissions)
        .is_some_and(|p| p.administrator());

    Invocation {
        invoker_id: interaction.user.id.to_string(),
        is_admin,
        guild_id: interaction.guild_id.map(|g| g.to_string()),
    }
}

struct BirthdayHandler {
    app: Arc<AppContext>,
}

#[serenity::async_trait]
impl EventHandler for BirthdayHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        log::info!("Discord: Bot connected as {}", ready.user.name);
        log::info!("Discord: Connected to {} guild(s)", ready.guilds.len());

        match register_commands(&ctx, self.app.config.command_guild_id).await {
            Ok(count) => log::info!("Discord: Registered {} slash command(s)", count),
            Err(e) => log::error!("Discord: Failed to register slash commands: {}", e),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        self.handle_command(&ctx, &command).await;
    }
}

impl BirthdayHandler {
    async fn handle_command(&self, ctx: &Context, interaction: &CommandInteraction) {
        let invocation = invocation_for(interaction);

        let reply = match parse_interaction(interaction) {
            Some(cmd) => {
                log::info!(
                    "Discord: /{} from {} (admin={})",
                    cmd.name(),
                    invocation.invoker_id,
                    invocation.is_admin
                );
                // The only suspension point: one blocking storage round trip
                let db = self.app.db.clone();
                tokio::task::spawn_blocking(move || commands::respond(cmd, &invocation, &db))
                    .await
                    .unwrap_or_else(|e| Reply::private(BotError::from(e).user_message()))
            }
            None => {
                log::warn!(
                    "Discord: Unrecognised command '{}' from {}",
                    interaction.data.name,
                    invocation.invoker_id
                );
                Reply::private("Sorry, I don't know that command.")
            }
        };

        if let Err(e) = send_reply(ctx, interaction, reply).await {
            log::error!("Discord: Failed to send reply: {}", e);
        }
    }
}

/// Answer the interaction, spilling long text and follow-ups into follow-up messages
async fn send_reply(
    ctx: &Context,
    interaction: &CommandInteraction,
    reply: Reply,
) -> std::result::Result<(), serenity::Error> {
    let mut chunks = split_message(&reply.content, DISCORD_MESSAGE_LIMIT).into_iter();
    let first = chunks.next().unwrap_or_default();

    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(first)
                    .ephemeral(reply.ephemeral),
            ),
        )
        .await?;

    let rest = chunks.chain(
        reply
            .followups
            .iter()
            .flat_map(|text| split_message(text, DISCORD_MESSAGE_LIMIT)),
    );
    for chunk in rest {
        interaction
            .create_followup(
                &ctx.http,
                CreateInteractionResponseFollowup::new()
                    .content(chunk)
                    .ephemeral(reply.ephemeral),
            )
            .await?;
    }

    Ok(())
}

async fn register_commands(
    ctx: &Context,
    guild_id: Option<u64>,
) -> std::result::Result<usize, serenity::Error> {
    let definitions = command_definitions();
    let registered = match guild_id {
        Some(id) => GuildId::new(id).set_commands(&ctx.http, definitions).await?,
        None => SlashCommand::set_global_commands(&ctx.http, definitions).await?,
    };
    Ok(registered.len())
}

/// Split a message into chunks respecting Discord's character limit
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.chars().count() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.lines() {
        let line_len = line.chars().count();
        if current_len + line_len + 1 > max_len {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            // If single line is too long, split it on char boundaries
            if line_len > max_len {
                let chars: Vec<char> = line.chars().collect();
                let mut pieces: Vec<String> = chars
                    .chunks(max_len)
                    .map(|piece| piece.iter().collect())
                    .collect();
                if let Some(last) = pieces.pop() {
                    chunks.extend(pieces);
                    current_len = last.chars().count();
                    current = last;
                }
            } else {
                current = line.to_string();
                current_len = line_len;
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
                current_len += 1;
            }
            current.push_str(line);
            current_len += line_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Post announcements to their channels. Returns how many were delivered.
///
/// A bad channel id or a failed send is logged and skipped.
pub async fn send_announcements(http: &Http, announcements: &[Announcement]) -> usize {
    let mut sent = 0;
    for announcement in announcements {
        let Some(channel_id) = announcement
            .channel_id
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
        else {
            log::warn!(
                "Discord: Guild {} has an invalid notification channel '{}'",
                announcement.group_id,
                announcement.channel_id
            );
            continue;
        };

        match ChannelId::new(channel_id)
            .say(http, &announcement.message)
            .await
        {
            Ok(_) => sent += 1,
            Err(e) => log::error!(
                "Discord: Failed to announce birthday of {} in channel {}: {}",
                announcement.user_id,
                channel_id,
                e
            ),
        }
    }
    sent
}

/// Run the Discord client until it stops or Ctrl-C is pressed
pub async fn start_discord_listener(app: Arc<AppContext>) -> Result<()> {
    log::info!("Discord: Token length = {}", app.config.discord_token.len());

    // Slash commands only need guild events
    let intents = GatewayIntents::GUILDS;

    let handler = BirthdayHandler { app: app.clone() };

    let mut client = Client::builder(&app.config.discord_token, intents)
        .event_handler(handler)
        .await?;

    log::info!("Discord: Client created successfully");

    let shard_manager = client.shard_manager.clone();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("Discord: Received shutdown signal");
            shard_manager.shutdown_all().await;
        }
        result = client.start() => {
            result?;
            log::info!("Discord: Client stopped");
        }
    }

    Ok(())
}
