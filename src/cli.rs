use clap::{Args, Parser, Subcommand};

use crate::actions::Action;
use crate::config::{API_KEY_ENV, DEFAULT_LOOKBACK_DAYS};

#[derive(Parser, Debug)]
#[command(name = "mandrill")]
#[command(about = "Mandrill Helper", long_about = None, version)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Args, Debug, Clone)]
pub struct KeyArg {
    /// API Key to use
    #[arg(short = 'k', long = "key", env = API_KEY_ENV, hide_env_values = true)]
    pub key: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Performs a search on sent emails
    Search {
        #[command(flatten)]
        auth: KeyArg,

        /// How many days ago to perform search
        #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
        days: u32,

        /// Which query to perform search on
        query: String,
    },

    /// Check the information of a specific sent email
    Info {
        #[command(flatten)]
        auth: KeyArg,

        /// Which email to get contents from
        id: String,
    },

    /// Add/Remove/List emails from Rejection List
    Reject {
        #[command(subcommand)]
        cmd: RejectCommand,
    },

    /// Add/Remove/List emails from Permission List
    Permit {
        #[command(subcommand)]
        cmd: PermitCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RejectCommand {
    /// Adds emails to the rejection list
    Add {
        #[command(flatten)]
        auth: KeyArg,

        /// Desired SubAccount to perform action
        #[arg(short, long)]
        subaccount: Option<String>,

        /// List of emails to be added
        #[arg(required = true)]
        email: Vec<String>,
    },

    /// Removes emails from the rejection list
    Remove {
        #[command(flatten)]
        auth: KeyArg,

        /// Desired SubAccount to perform action
        #[arg(short, long)]
        subaccount: Option<String>,

        /// List of emails to be removed
        #[arg(required = true)]
        email: Vec<String>,
    },

    /// List emails on the rejection list
    List {
        #[command(flatten)]
        auth: KeyArg,

        /// Desired SubAccount to perform action
        #[arg(short, long)]
        subaccount: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PermitCommand {
    /// Adds emails to the permission list
    Add {
        #[command(flatten)]
        auth: KeyArg,

        /// List of emails to be added
        #[arg(required = true)]
        email: Vec<String>,
    },

    /// Removes emails from the permission list
    Remove {
        #[command(flatten)]
        auth: KeyArg,

        /// List of emails to be removed
        #[arg(required = true)]
        email: Vec<String>,
    },

    /// List emails on the permission list
    List {
        #[command(flatten)]
        auth: KeyArg,

        /// Desired SubAccount to perform action
        #[arg(short, long)]
        subaccount: Option<String>,
    },
}

impl Cli {
    /// Split into the API key and the action to run with it.
    pub fn into_parts(self) -> (String, Action) {
        let (auth, action) = match self.cmd {
            Command::Search { auth, days, query } => (auth, Action::Search { query, days }),
            Command::Info { auth, id } => (auth, Action::Info { id }),
            Command::Reject { cmd } => match cmd {
                RejectCommand::Add {
                    auth,
                    subaccount,
                    email,
                } => (
                    auth,
                    Action::RejectAdd {
                        emails: email,
                        subaccount,
                    },
                ),
                RejectCommand::Remove {
                    auth,
                    subaccount,
                    email,
                } => (
                    auth,
                    Action::RejectRemove {
                        emails: email,
                        subaccount,
                    },
                ),
                RejectCommand::List { auth, subaccount } => {
                    (auth, Action::RejectList { subaccount })
                }
            },
            Command::Permit { cmd } => match cmd {
                PermitCommand::Add { auth, email } => (auth, Action::PermitAdd { emails: email }),
                PermitCommand::Remove { auth, email } => {
                    (auth, Action::PermitRemove { emails: email })
                }
                PermitCommand::List { auth, subaccount } => {
                    (auth, Action::PermitList { subaccount })
                }
            },
        };
        (auth.key, action)
    }
}
