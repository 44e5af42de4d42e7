//! Local account session commands.

use clap::Subcommand;
use vitalog_core::storage::Database;
use vitalog_core::AuthManager;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in with email and password
    SignIn {
        /// Email address
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    SignUp {
        /// Email address
        email: String,
        /// Password (at least 6 characters)
        #[arg(long)]
        password: String,
        /// Display name
        #[arg(long)]
        name: String,
    },
    /// End the current session
    SignOut,
    /// Show the current session
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut auth = AuthManager::new(Database::open()?);

    match action {
        AuthAction::SignIn { email, password } => {
            let runtime = tokio::runtime::Runtime::new()?;
            let user = runtime.block_on(auth.sign_in(&email, &password))?;
            println!("Signed in as {} <{}>", user.display_name, user.email);
        }
        AuthAction::SignUp {
            email,
            password,
            name,
        } => {
            let runtime = tokio::runtime::Runtime::new()?;
            let user = runtime.block_on(auth.sign_up(&email, &password, &name))?;
            println!("Account created for {} <{}>", user.display_name, user.email);
        }
        AuthAction::SignOut => {
            auth.sign_out()?;
            println!("Signed out");
        }
        AuthAction::Status => match auth.current_user()? {
            Some(user) => println!("Signed in as {} <{}>", user.display_name, user.email),
            None => println!("Not signed in"),
        },
    }
    Ok(())
}
