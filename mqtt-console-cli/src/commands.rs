//! Subcommands.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use anyhow::bail;
use chrono::DateTime;
use chrono::Utc;
use clap::Args;
use clap::Subcommand;
use clap::ValueEnum;
use mqtt_console_lib::BrokerClient;
use mqtt_console_lib::auth::PasswordLogin;
use mqtt_console_lib::auth::StaticTokenProvider;
use mqtt_console_lib::model::ShortClientSessionInfo;
use mqtt_console_lib::model::ShortMqttClientCredentials;
use mqtt_console_lib::error::TableError;
use mqtt_console_lib::page::PageLink;
use mqtt_console_lib::page::SortOrder;
use mqtt_console_lib::page::TimePageLink;
use mqtt_console_lib::table::EntityTableConfig;
use mqtt_console_lib::table::LoadOutcome;
use mqtt_console_lib::tables;
use mqtt_console_lib::tables::ConsoleContext;
use mqtt_console_lib::tables::PasswordChange;
use serde::Serialize;
use uuid::Uuid;

use crate::render::render_table;
use crate::settings::SettingKey;
use crate::settings::SettingsProvider;
use crate::terminal::BrowserNavigator;
use crate::terminal::TerminalDialogs;
use crate::terminal::TerminalSink;

/// Broker used when neither `--url` nor `broker.url` is set.
pub const DEFAULT_URL: &str = "http://localhost:8083";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Rows fetched per page while looking up a single row.
const LOOKUP_PAGE_SIZE: u32 = 50;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or change stored settings
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },

    /// Log in with a username and password and store the issued token
    Login { username: String, password: String },

    /// List client sessions
    Sessions(PagingArgs),

    /// Show the details of one client session
    Session { client_id: String },

    /// Disconnect a connected client
    Disconnect { client_id: String },

    /// Remove the stored session of a disconnected client
    RemoveSession { client_id: String },

    /// List MQTT client credentials
    Credentials(PagingArgs),

    /// Delete MQTT client credentials
    DeleteCredentials { id: Uuid },

    /// Change the password of MQTT basic credentials
    ChangePassword {
        id: Uuid,
        /// Current password, empty if none is set
        current: String,
        new: String,
        /// The new password again
        confirm: String,
    },

    /// List Kafka topics
    Topics(PagingArgs),

    /// List Kafka consumer groups
    ConsumerGroups(PagingArgs),

    /// List retained messages
    Retained {
        #[command(flatten)]
        paging: PagingArgs,
        /// Only messages created at or after this time (RFC 3339)
        #[arg(long)]
        since: Option<DateTime<Utc>>,
        /// Only messages created at or before this time (RFC 3339)
        #[arg(long)]
        until: Option<DateTime<Utc>>,
    },

    /// Delete the retained message of a topic
    DeleteRetained { topic: String },

    /// Print the broker configuration
    BrokerConfig,

    /// Print the broker version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print all settings
    Show,
    /// Store a setting
    Set { key: SettingKey, value: String },
    /// Remove a setting
    Unset { key: SettingKey },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PagingArgs {
    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    /// Rows per page [default: table.page_size, or the table's own]
    #[arg(long)]
    pub page_size: Option<u32>,
    /// Free-text filter
    #[arg(long)]
    pub search: Option<String>,
    /// Property to sort by, e.g. createdTime
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

impl PagingArgs {
    pub fn page_link(&self, page_size: u32) -> PageLink {
        let mut link = PageLink::new(page_size).with_page(self.page);
        if let Some(search) = &self.search {
            link = link.with_text_search(search.clone());
        }
        if let Some(property) = &self.sort {
            link = link.with_sort(if self.desc {
                SortOrder::desc(property.clone())
            } else {
                SortOrder::asc(property.clone())
            });
        }
        link
    }
}

/// A row action failed and the failure was already shown to the operator.
#[derive(Debug, thiserror::Error)]
#[error("action failed")]
pub struct Reported;

/// Connection options and settings shared by all commands.
pub struct Console {
    pub settings: SettingsProvider,
    pub url: Option<String>,
    pub token: Option<String>,
    pub assume_yes: bool,
    pub width: usize,
}

impl Console {
    async fn url(&self) -> anyhow::Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        Ok(self
            .settings
            .broker_url()
            .await?
            .unwrap_or_else(|| DEFAULT_URL.to_string()))
    }

    async fn client(&self) -> anyhow::Result<BrokerClient> {
        let token = match &self.token {
            Some(token) => token.clone(),
            None => match self.settings.broker_token().await? {
                Some(token) => token,
                None => bail!("not logged in: run `mqtt-console login` or pass --token"),
            },
        };
        let client = BrokerClient::builder()
            .url(self.url().await?)
            .token_provider(StaticTokenProvider::new(token))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(client)
    }

    async fn context(&self, password_change: Option<PasswordChange>) -> anyhow::Result<ConsoleContext> {
        let ctx = ConsoleContext::new(self.client().await?);
        let dialogs = TerminalDialogs {
            assume_yes: self.assume_yes,
            password_change,
            translator: ctx.translator.clone(),
        };
        Ok(ctx
            .with_notifier(Arc::new(TerminalSink))
            .with_navigator(Arc::new(BrowserNavigator))
            .with_dialogs(Arc::new(dialogs)))
    }

    /// `--page-size`, else the stored default, else the table's own.
    async fn page_link<T>(&self, args: &PagingArgs, table: &EntityTableConfig<T>) -> anyhow::Result<PageLink>
    where
        T: Serialize + Clone + Send + Sync + 'static,
    {
        let size = match args.page_size {
            Some(size) => size,
            None => self
                .settings
                .page_size()
                .await?
                .unwrap_or_else(|| table.default_page_size()),
        };
        Ok(args.page_link(size))
    }
}

pub async fn run(command: Command, console: &Console) -> anyhow::Result<()> {
    match command {
        Command::Config { cmd } => run_config(cmd, &console.settings).await,
        Command::Login { username, password } => run_login(console, username, password).await,

        Command::Sessions(args) => {
            let table = tables::sessions_table(&console.context(None).await?);
            let link = console.page_link(&args, &table).await?;
            show(&table, link.into(), console.width).await
        }
        Command::Session { client_id } => {
            let table = tables::sessions_table(&console.context(None).await?);
            let index = find_session(&table, &client_id).await?;
            finish(table.handle_row_click(index).await.map(|_| ()))
        }
        Command::Disconnect { client_id } => {
            let table = tables::sessions_table(&console.context(None).await?);
            let index = find_session(&table, &client_id).await?;
            finish(run_action(&table, tables::DISCONNECT_ACTION, index).await)
        }
        Command::RemoveSession { client_id } => {
            let table = tables::sessions_table(&console.context(None).await?);
            let index = find_session(&table, &client_id).await?;
            finish(run_action(&table, tables::REMOVE_ACTION, index).await)
        }

        Command::Credentials(args) => {
            let table = tables::client_credentials_table(&console.context(None).await?);
            let link = console.page_link(&args, &table).await?;
            show(&table, link.into(), console.width).await
        }
        Command::DeleteCredentials { id } => {
            let table = tables::client_credentials_table(&console.context(None).await?);
            let index = find_credentials(&table, id).await?;
            finish(run_action(&table, tables::DELETE_CREDENTIALS_ACTION, index).await)
        }
        Command::ChangePassword {
            id,
            current,
            new,
            confirm,
        } => {
            let change = PasswordChange {
                current,
                new,
                confirmation: confirm,
            };
            let table = tables::client_credentials_table(&console.context(Some(change)).await?);
            let index = find_credentials(&table, id).await?;
            finish(run_action(&table, tables::CHANGE_PASSWORD_ACTION, index).await)
        }

        Command::Topics(args) => {
            let table = tables::kafka_topics_table(&console.context(None).await?);
            let link = console.page_link(&args, &table).await?;
            show(&table, link.into(), console.width).await
        }
        Command::ConsumerGroups(args) => {
            let table = tables::kafka_consumer_groups_table(&console.context(None).await?);
            let link = console.page_link(&args, &table).await?;
            show(&table, link.into(), console.width).await
        }

        Command::Retained {
            paging,
            since,
            until,
        } => {
            let table = tables::retained_messages_table(&console.context(None).await?);
            let link = TimePageLink::new(console.page_link(&paging, &table).await?)
                .with_time_range(since, until)?;
            show(&table, link, console.width).await
        }
        Command::DeleteRetained { topic } => {
            let table = tables::retained_messages_table(&console.context(None).await?);
            let link = PageLink::new(LOOKUP_PAGE_SIZE).with_text_search(topic.clone());
            let index = find_row(&table, link, |message| message.topic == topic)
                .await?
                .with_context(|| format!("no retained message on '{topic}'"))?;
            finish(run_action(&table, tables::DELETE_RETAINED_ACTION, index).await)
        }

        Command::BrokerConfig => {
            let client = console.client().await?;
            let config = client.broker_config().await?;
            for (key, value) in config.iter() {
                println!("{key} = {value}");
            }
            let brokers = client.broker_service_ids().await?;
            println!("brokers = {}", brokers.join(", "));
            Ok(())
        }
        Command::Version => {
            let info = console.client().await?.system_info().await?;
            println!("{} {}", info.name.as_deref().unwrap_or("broker"), info.version);
            if let Some(build_time) = &info.build_time {
                println!("built {build_time}");
            }
            Ok(())
        }
    }
}

async fn run_config(cmd: ConfigCommand, settings: &SettingsProvider) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show => {
            for key in SettingKey::ALL {
                let value = settings.display(key).await?;
                println!("{:<16}{}", key.as_str(), value.as_deref().unwrap_or("(unset)"));
            }
            let mut stray = settings.keys_with_prefix("").await?;
            stray.retain(|key| SettingKey::from_str(key, false).is_err());
            stray.sort();
            for key in stray {
                println!("{key:<16}(unknown)");
            }
        }
        ConfigCommand::Set { key, value } => settings.set_raw(key, &value).await?,
        ConfigCommand::Unset { key } => settings.delete(key.as_str()).await?,
    }
    Ok(())
}

async fn run_login(console: &Console, username: String, password: String) -> anyhow::Result<()> {
    let url = console.url().await?;
    let token = PasswordLogin::new(username, password)
        .authenticate(&url)
        .await
        .with_context(|| format!("login to {url} failed"))?;
    if console.url.is_some() {
        console.settings.set_raw(SettingKey::BrokerUrl, &url).await?;
    }
    console
        .settings
        .set_raw(SettingKey::BrokerToken, &token.access_token)
        .await?;
    println!("Logged in to {url}");
    Ok(())
}

/// Loads one page and prints it.
async fn show<T>(table: &EntityTableConfig<T>, link: TimePageLink, width: usize) -> anyhow::Result<()>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    if let LoadOutcome::Failed(err) = table.load(link).await {
        return Err(err.into());
    }
    print!("{}", render_table(&table.render(), width));
    Ok(())
}

/// Pages through `link` until a row matches. The matching page stays loaded.
async fn find_row<T>(
    table: &EntityTableConfig<T>,
    mut link: PageLink,
    matches: impl Fn(&T) -> bool,
) -> anyhow::Result<Option<usize>>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    loop {
        if let LoadOutcome::Failed(err) = table.load(link.clone()).await {
            return Err(err.into());
        }
        let page = table.page();
        if let Some(index) = page.data().iter().position(&matches) {
            return Ok(Some(index));
        }
        if !page.has_next() {
            return Ok(None);
        }
        link = link.next_page_link();
    }
}

async fn find_session(
    table: &EntityTableConfig<ShortClientSessionInfo>,
    client_id: &str,
) -> anyhow::Result<usize> {
    let link = PageLink::new(LOOKUP_PAGE_SIZE).with_text_search(client_id);
    find_row(table, link, |session| session.client_id == client_id)
        .await?
        .with_context(|| format!("no session for client '{client_id}'"))
}

async fn find_credentials(
    table: &EntityTableConfig<ShortMqttClientCredentials>,
    id: Uuid,
) -> anyhow::Result<usize> {
    find_row(table, PageLink::new(LOOKUP_PAGE_SIZE), |credentials| credentials.id == id)
    .await?
    .with_context(|| format!("no client credentials with id {id}"))
}

async fn run_action<T>(table: &EntityTableConfig<T>, name: &str, index: usize) -> Result<(), TableError>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    table.run_row_action(name, index).await.map(|_| ())
}

/// Maps action failures, which the notifier already printed, to [`Reported`].
fn finish(result: Result<(), TableError>) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(TableError::ActionFailed(err)) => {
            log::error!("{err}");
            Err(Reported.into())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use mqtt_console_lib::page::Direction;

    use super::*;

    #[test]
    fn test_paging_args_to_link() {
        let args = PagingArgs {
            page: 2,
            page_size: None,
            search: Some("sensor".into()),
            sort: Some("createdTime".into()),
            desc: true,
        };
        let link = args.page_link(20);
        assert_eq!(link.page, 2);
        assert_eq!(link.page_size, 20);
        assert_eq!(link.text_search.as_deref(), Some("sensor"));
        let sort = link.sort_order.unwrap();
        assert_eq!(sort.property, "createdTime");
        assert_eq!(sort.direction, Direction::Desc);
    }

    #[test]
    fn test_default_paging_args() {
        let link = PagingArgs::default().page_link(10);
        assert_eq!(link, PageLink::new(10));
    }
}
