use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sprintdesk",
    about = "SprintDesk: issues, projects, and people from the terminal",
    version
)]
pub struct Cli {
    /// Path to a TOML config file (defaults to $SPRINTDESK_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the access token
    Login {
        /// Username
        username: String,

        /// Password (falls back to $SPRINTDESK_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the stored access token
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a new account
    Register {
        /// Username
        username: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// First name
        #[arg(long)]
        firstname: String,

        /// Last name
        #[arg(long)]
        lastname: String,

        /// Job title
        #[arg(long)]
        title: Option<String>,

        /// Password (falls back to $SPRINTDESK_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Issue operations
    Issue {
        #[command(subcommand)]
        command: IssueCommands,
    },

    /// Project operations
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// User administration
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Label operations
    Label {
        #[command(subcommand)]
        command: LabelCommands,
    },

    /// Dashboard charts over issues, projects, and users
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration (no network)
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// List issues with optional search and filters
    List {
        /// Filter by status (repeatable)
        #[arg(long)]
        status: Vec<String>,

        /// Filter by priority (repeatable)
        #[arg(long)]
        priority: Vec<String>,

        /// Filter by assignee: user id, @username, or `unassigned` (repeatable)
        #[arg(long)]
        assignee: Vec<String>,

        /// Filter by author: user id or @username (repeatable)
        #[arg(long)]
        author: Vec<String>,

        /// Filter by project: id or exact name (repeatable)
        #[arg(long)]
        project: Vec<String>,

        /// Hide closed issues unless --status is given
        #[arg(long)]
        open: bool,

        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one issue with its comments and labels
    Show {
        /// Issue ID
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an issue
    Create {
        /// Issue title
        title: String,

        /// Project: id or exact name
        #[arg(long)]
        project: String,

        /// Issue description
        #[arg(long)]
        description: Option<String>,

        /// Issue status
        #[arg(long, default_value = "Open")]
        status: String,

        /// Issue priority
        #[arg(long, default_value = "Medium")]
        priority: String,

        /// Assignee: user id or @username
        #[arg(long)]
        assignee: Option<String>,

        /// Time estimate in hours
        #[arg(long)]
        estimate: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit the title or description in place
    Edit {
        /// Issue ID
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description (empty clears it)
        #[arg(long)]
        description: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the workflow status
    Status {
        /// Issue ID
        id: i64,

        /// New status
        status: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the priority
    Priority {
        /// Issue ID
        id: i64,

        /// New priority
        priority: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign to a user, or `none` to unassign
    Assign {
        /// Issue ID
        id: i64,

        /// User id, @username, or `none`
        assignee: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Close an issue
    Close {
        /// Issue ID
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reopen a closed issue
    Reopen {
        /// Issue ID
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an issue
    Delete {
        /// Issue ID
        id: i64,
    },

    /// Add a comment
    Comment {
        /// Issue ID
        id: i64,

        /// Comment text
        content: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List comments on an issue
    Comments {
        /// Issue ID
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects with optional search and filters
    List {
        /// Filter by status (repeatable)
        #[arg(long)]
        status: Vec<String>,

        /// Filter by creator: user id or @username (repeatable)
        #[arg(long)]
        creator: Vec<String>,

        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one project with its members and issues
    Show {
        /// Project ID
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a project
    Create {
        /// Project name
        name: String,

        /// Project description
        #[arg(long)]
        description: Option<String>,

        /// Project status
        #[arg(long, default_value = "Active")]
        status: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a project or change its description in place
    Edit {
        /// Project ID
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the project status
    Status {
        /// Project ID
        id: i64,

        /// New status
        status: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a project
    Delete {
        /// Project ID
        id: i64,
    },

    /// Project membership
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },
}

#[derive(Subcommand)]
pub enum MemberCommands {
    /// List project members
    List {
        /// Project ID
        project: i64,

        /// Filter by role (repeatable)
        #[arg(long)]
        role: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a user to a project
    Add {
        /// Project ID
        project: i64,

        /// User id or @username
        user: String,
    },

    /// Remove a user from a project
    Remove {
        /// Project ID
        project: i64,

        /// User id or @username
        user: String,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users with optional search and filters
    List {
        /// Filter by role (repeatable)
        #[arg(long)]
        role: Vec<String>,

        /// Only active accounts
        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        /// Only deactivated accounts
        #[arg(long)]
        inactive: bool,

        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one user
    Show {
        /// User id or @username
        user: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reactivate an account
    Activate {
        /// User id or @username
        user: String,
    },

    /// Deactivate an account
    Deactivate {
        /// User id or @username
        user: String,
    },

    /// Delete an account
    Delete {
        /// User id or @username
        user: String,
    },
}

#[derive(Subcommand)]
pub enum LabelCommands {
    /// List labels, or the labels on one issue
    List {
        /// Only labels attached to this issue
        #[arg(long)]
        issue: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a label
    Create {
        /// Label name
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a label
    Rename {
        /// Label ID
        id: i64,

        /// New name
        name: String,
    },

    /// Delete a label
    Delete {
        /// Label ID
        id: i64,
    },

    /// Attach a label to an issue
    Add {
        /// Issue ID
        issue: i64,

        /// Label id or name
        label: String,
    },

    /// Detach a label from an issue
    Remove {
        /// Issue ID
        issue: i64,

        /// Label id or name
        label: String,
    },
}
