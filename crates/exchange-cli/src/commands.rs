//! Subcommands and their dispatch. Every command prints its result as
//! pretty JSON on stdout.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use exchange_client::{ApiClient, Listing};
use exchange_core::{
  project::{Level, NewMessage, NewProject, Project, ProjectPatch},
  query::ProjectFilter,
  source::{ProjectSource, StaticSource},
  user::{Credentials, Registration, UserPatch},
};
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Create an account; prints the issued token and user.
  Register {
    #[arg(long)]
    name:     String,
    #[arg(long)]
    email:    String,
    #[arg(long)]
    password: String,
  },
  /// Log in; prints the issued token and user.
  Login {
    #[arg(long)]
    email:    String,
    #[arg(long)]
    password: String,
  },
  #[command(subcommand)]
  User(UserCommand),
  #[command(subcommand)]
  Projects(ProjectCommand),
  #[command(subcommand)]
  Messages(MessageCommand),
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
  Show { id: u64 },
  /// Update your own profile; omitted fields are left as they are.
  Update {
    id:     u64,
    #[arg(long)]
    name:   Option<String>,
    /// Comma-separated, e.g. "Rust, Postgres".
    #[arg(long)]
    skills: Option<String>,
    #[arg(long)]
    bio:    Option<String>,
    #[arg(long)]
    avatar: Option<String>,
  },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
  /// List projects matching every given filter.
  List(FilterArgs),
  Show { id: u64 },
  Create {
    #[arg(long)]
    title:       String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    category:    String,
    #[arg(long)]
    level:       Level,
    #[arg(long)]
    methodology: Option<String>,
    #[arg(long)]
    duration:    Option<String>,
    #[arg(long)]
    involvement: Option<String>,
  },
  Update {
    id:          u64,
    #[arg(long)]
    title:       Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category:    Option<String>,
    #[arg(long)]
    level:       Option<Level>,
    #[arg(long)]
    methodology: Option<String>,
    #[arg(long)]
    duration:    Option<String>,
    #[arg(long)]
    involvement: Option<String>,
  },
  Delete { id: u64 },
  /// Apply to join a project as the authenticated user.
  Apply { id: u64 },
  /// Accept a pending applicant (project owner only).
  Accept { id: u64, user_id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum MessageCommand {
  /// Print a project's messages, oldest first.
  List { project_id: u64 },
  Send { project_id: u64, content: String },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
  #[arg(long)]
  category:    Option<String>,
  #[arg(long)]
  level:       Option<Level>,
  #[arg(long)]
  methodology: Option<String>,
  #[arg(long)]
  duration:    Option<String>,
  #[arg(long)]
  involvement: Option<String>,
  /// Only projects with a KPI score of at least this value.
  #[arg(long)]
  min_kpi:     Option<u8>,
}

impl From<FilterArgs> for ProjectFilter {
  fn from(a: FilterArgs) -> Self {
    ProjectFilter {
      category:    a.category,
      level:       a.level,
      methodology: a.methodology,
      duration:    a.duration,
      involvement: a.involvement,
      min_kpi:     a.min_kpi,
    }
  }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  let out = serde_json::to_string_pretty(value).context("serialising output")?;
  println!("{out}");
  Ok(())
}

async fn list_from<S: ProjectSource>(
  source: &S,
  filter: &ProjectFilter,
) -> Result<Vec<Project>> {
  source
    .list_projects(filter)
    .await
    .context("listing projects")
}

pub async fn run(command: Command, client: &ApiClient, listing: Listing) -> Result<()> {
  match command {
    Command::Register { name, email, password } => {
      let auth = client
        .register(&Registration { name, email, password })
        .await
        .context("POST /auth/register")?;
      print_json(&auth)
    }
    Command::Login { email, password } => {
      let auth = client
        .login(&Credentials { email, password })
        .await
        .context("POST /auth/login")?;
      print_json(&auth)
    }
    Command::User(cmd) => run_user(cmd, client).await,
    Command::Projects(cmd) => run_projects(cmd, client, listing).await,
    Command::Messages(cmd) => run_messages(cmd, client).await,
  }
}

async fn run_user(command: UserCommand, client: &ApiClient) -> Result<()> {
  match command {
    UserCommand::Show { id } => {
      let user = client
        .get_user(id)
        .await
        .with_context(|| format!("GET /users/{id}"))?;
      print_json(&user)
    }
    UserCommand::Update { id, name, skills, bio, avatar } => {
      let patch = UserPatch { name, skills, bio, avatar };
      if patch.is_empty() {
        anyhow::bail!("nothing to update: pass at least one of --name, --skills, --bio, --avatar");
      }
      let user = client
        .update_user(id, &patch)
        .await
        .with_context(|| format!("PUT /users/{id}"))?;
      print_json(&user)
    }
  }
}

async fn run_projects(
  command: ProjectCommand,
  client: &ApiClient,
  listing: Listing,
) -> Result<()> {
  match command {
    ProjectCommand::List(args) => {
      let filter = ProjectFilter::from(args);
      let projects = match listing {
        Listing::Static => {
          let source = StaticSource::sample().context("loading sample catalogue")?;
          list_from(&source, &filter).await?
        }
        Listing::Remote => list_from(client, &filter).await?,
      };
      tracing::info!(count = projects.len(), "projects listed");
      print_json(&projects)
    }
    ProjectCommand::Show { id } => {
      let mut project = client
        .get_project(id)
        .await
        .with_context(|| format!("GET /projects/{id}"))?;
      project.messages = project
        .messages_chronological()
        .into_iter()
        .cloned()
        .collect();
      print_json(&project)
    }
    ProjectCommand::Create {
      title,
      description,
      category,
      level,
      methodology,
      duration,
      involvement,
    } => {
      let new = NewProject {
        title,
        description,
        category,
        level,
        methodology,
        duration,
        involvement,
      };
      let project = client
        .create_project(&new)
        .await
        .context("POST /projects")?;
      print_json(&project)
    }
    ProjectCommand::Update {
      id,
      title,
      description,
      category,
      level,
      methodology,
      duration,
      involvement,
    } => {
      let patch = ProjectPatch {
        title,
        description,
        category,
        level,
        methodology,
        duration,
        involvement,
      };
      let project = client
        .update_project(id, &patch)
        .await
        .with_context(|| format!("PUT /projects/{id}"))?;
      print_json(&project)
    }
    ProjectCommand::Delete { id } => {
      client
        .delete_project(id)
        .await
        .with_context(|| format!("DELETE /projects/{id}"))?;
      print_json(&serde_json::json!({ "deleted": id }))
    }
    ProjectCommand::Apply { id } => {
      let member = client
        .apply_to_project(id)
        .await
        .with_context(|| format!("POST /projects/{id}/apply"))?;
      print_json(&member)
    }
    ProjectCommand::Accept { id, user_id } => {
      let member = client
        .accept_member(id, user_id)
        .await
        .with_context(|| format!("POST /projects/{id}/accept/{user_id}"))?;
      print_json(&member)
    }
  }
}

async fn run_messages(command: MessageCommand, client: &ApiClient) -> Result<()> {
  match command {
    MessageCommand::List { project_id } => {
      let mut messages = client
        .list_messages(project_id)
        .await
        .with_context(|| format!("GET /projects/{project_id}/messages"))?;
      messages.sort_by_key(|m| m.created_at);
      print_json(&messages)
    }
    MessageCommand::Send { project_id, content } => {
      let message = client
        .send_message(project_id, &NewMessage { content })
        .await
        .with_context(|| format!("POST /projects/{project_id}/messages"))?;
      print_json(&message)
    }
  }
}
