use anyhow::Result;
use credscan::config::Config;
use credscan::utils::input_validation::{
    checklist, password_input_validation, report, username_input_validation,
};
use credscan::utils::trace::LogTrace;
use credscan::{PasswordValidator, UsernameValidator};
use derive_more::Display;
use inquire::{Password, PasswordDisplayMode, Select, Text};
use log::info;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

type MenuExit = Option<()>;
const MENU_EXIT: MenuExit = None;
const MENU_LOOP: MenuExit = Some(());

/// A text menu
trait Menu {
    /// Runs the menu once. Returns None when the menu is done,
    /// Some(()) to run it again.
    fn enter(&mut self) -> Result<Option<()>>;

    /// Runs the menu until it exits, printing errors along the way
    fn enter_loop(&mut self) {
        while let Some(result) = self.enter().transpose() {
            if let Err(error) = result {
                eprintln!("Error: {error}");
            }
        }
    }
}

pub struct App {
    passwords: PasswordValidator,
    usernames: UsernameValidator,
}

impl App {
    pub fn new(config: Config) -> Self {
        App {
            passwords: PasswordValidator::new(config.password),
            usernames: UsernameValidator::new(config.username),
        }
    }

    pub fn start(&mut self) -> Result<()> {
        println!("Welcome to the credential testbed.");
        self.enter_loop();
        Ok(())
    }

    fn check_username(&self) -> Result<()> {
        let input = Text::new("Username to check:").prompt()?;
        let result = self.usernames.validate_with_trace(&input, &mut LogTrace);
        info!("Username check: ok={} error_index={:?}", result.ok, result.error_index);

        if result.ok {
            println!("[*] Success! The username is valid.");
        } else {
            report(&input, &result);
        }
        Ok(())
    }

    fn check_password(&self) -> Result<()> {
        let input = Password::new("Password to check:")
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()?;
        let result = self.passwords.validate_with_trace(&input, &mut LogTrace);
        info!("Password check: ok={} error_index={:?}", result.ok, result.error_index);

        for line in checklist(&result) {
            println!("  {line}");
        }
        if result.ok {
            println!("[*] Success! The password satisfies all the requirements.");
        } else {
            println!("{}", result.message);
        }
        Ok(())
    }

    fn set_up_account(&self) -> Result<()> {
        let username = username_input_validation("Choose a username:", &self.usernames)?;
        let _password = password_input_validation("Choose a password:", &self.passwords)?;
        info!("Account set up for {username}");
        println!("[*] Account details for {username} accepted.");
        Ok(())
    }
}

impl Menu for App {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Check a username")]
            Username,
            #[display("Check a password")]
            Password,
            #[display("Set up an account")]
            SetUp,
            #[display("Quit")]
            Exit,
        }

        let choice = Select::new("What do you want to do?", Choice::iter().collect()).prompt()?;

        match choice {
            Choice::Username => self.check_username()?,
            Choice::Password => self.check_password()?,
            Choice::SetUp => self.set_up_account()?,
            Choice::Exit => return Ok(MENU_EXIT),
        }
        Ok(MENU_LOOP)
    }
}

fn main() -> anyhow::Result<()> {
    let path = Config::default_path();
    let found = Config::read(&path)?;
    let missing = found.is_none();
    let config = found.unwrap_or_default();
    simple_logging::log_to_file(&config.log_file, config.level_filter()?)?;
    if missing {
        info!("Config file {} not found, using defaults", path.display());
    }

    App::new(config).start()
}
