use std::ffi::OsString;

pub use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(
    name = "mbx",
    version,
    about = "Browse and manage contact form submissions",
    long_about = None,
    arg_required_else_help = true
)]
struct ClapArgs {
    /// API endpoint
    /// Required unless MAILBOX_API is set. Must be an http or https URL.
    #[clap(long, global = true, help = "API endpoint")]
    api: Option<String>,

    /// Basic auth username, falls back to MAILBOX_USR
    #[clap(long, global = true, help = "API username")]
    usr: Option<String>,

    /// Basic auth password, falls back to MAILBOX_PWD
    #[clap(long, global = true, help = "API password")]
    pwd: Option<String>,

    /// Verbose mode
    /// Optional. Enables debug logging unless MAILBOX_LOG_LEVEL says otherwise.
    #[clap(
        short = 'v',
        long,
        global = true,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,

    #[command(subcommand)]
    command: Action,
}

/// What the invocation asks for
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Browse contact form submissions
    Browse,

    /// Submit a new message to the contact form
    New {
        #[clap(short = 'f', long = "from", help = "The source email address")]
        from: Option<String>,

        #[clap(short = 's', long = "sub", help = "The message subject")]
        subject: Option<String>,

        #[clap(short = 'm', long = "msg", help = "The message body")]
        message: Option<String>,
    },

    /// Fetch a single submission by ID
    Get {
        #[clap(help = "Submission ID")]
        id: String,
    },

    /// Print the version number
    Version,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    api: Option<String>,
    usr: Option<String>,
    pwd: Option<String>,
    verbose: bool,
    action: Action,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            api: args.api,
            usr: args.usr,
            pwd: args.pwd,
            verbose: args.verbose,
            action: args.command,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    /// Like `parse_from`, but reports bad input instead of exiting
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::try_parse_from(itr).map(Into::into)
    }

    pub fn api(&self) -> Option<&str> {
        self.api.as_deref()
    }

    pub fn usr(&self) -> Option<&str> {
        self.usr.as_deref()
    }

    pub fn pwd(&self) -> Option<&str> {
        self.pwd.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn action(&self) -> &Action {
        &self.action
    }
}
