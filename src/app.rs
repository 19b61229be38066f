use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand};
use cloudseal::config::{BLOB_EXTENSION, NAME_SUFFIX, PASSWORD_MIN_LENGTH};
use cloudseal::{ContentCipher, DisplayName, MasterPassword, NameCipher, NameNonce, Session};
use tokio::task::JoinSet;
use tracing::{Level, info, warn};

use crate::file;
use crate::types::{Mode, Outcome};
use crate::ui::display;
use crate::ui::progress::Bar;
use crate::ui::prompt::Prompt;

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt files and their names for upload.
    Encrypt {
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output directory (defaults to each input's directory).
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        password: Option<String>,

        /// Store the blob as `<name>.blob` instead of under an encrypted name.
        #[arg(long)]
        keep_name: bool,

        /// Store a 12-byte name nonce instead of the compact 8-byte one.
        #[arg(long)]
        full_nonce: bool,

        #[arg(long)]
        force: bool,
    },

    /// Decrypt downloaded blobs, restoring their names.
    Decrypt {
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        password: Option<String>,

        #[arg(long)]
        force: bool,
    },

    /// Print the encrypted token for a file name.
    EncryptName {
        name: String,

        #[arg(short, long)]
        password: Option<String>,

        #[arg(long)]
        full_nonce: bool,
    },

    /// Print the display name for one or more stored names.
    DecryptName {
        #[arg(required = true)]
        tokens: Vec<String>,

        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Parser)]
#[command(name = "cloudseal", version = "26.1.0", about = "Client-side AES-256-GCM encryption of file contents and names for untrusted cloud storage.")]
pub struct App {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl App {
    pub fn init() -> Result<Self> {
        let app = Self::parse();

        let level = if app.verbose { Level::DEBUG } else { Level::INFO };
        let subscriber = tracing_subscriber::fmt().with_max_level(level).with_file(true).with_line_number(true).with_writer(std::io::stderr).finish();
        tracing::subscriber::set_global_default(subscriber)?;

        Ok(app)
    }

    pub async fn execute(self) -> Result<()> {
        let prompt = Prompt::new(PASSWORD_MIN_LENGTH);
        match self.command {
            Commands::Encrypt { input, output, password, keep_name, full_nonce, force } => {
                let session = Self::session(password, Mode::Encrypt, &prompt, full_nonce)?;
                let options = EncryptOptions { keep_name, force };
                Self::run_files(Mode::Encrypt, input, output, session, move |session, path, dir| Self::encrypt_file(session, path, dir, options)).await
            }
            Commands::Decrypt { input, output, password, force } => {
                let session = Self::session(password, Mode::Decrypt, &prompt, false)?;
                Self::run_files(Mode::Decrypt, input, output, session, move |session, path, dir| Self::decrypt_file(session, path, dir, force)).await
            }
            Commands::EncryptName { name, password, full_nonce } => {
                let session = Self::session(password, Mode::Encrypt, &prompt, full_nonce)?;
                let token = session.encrypt_name(&name).context("name encryption failed")?;
                display::show_token(&token);
                Ok(())
            }
            Commands::DecryptName { tokens, password } => {
                let session = Self::session(password, Mode::Decrypt, &prompt, false)?;
                for token in &tokens {
                    display::show_display_name(&session.resolve_name(token));
                }
                Ok(())
            }
        }
    }

    fn session(password: Option<String>, mode: Mode, prompt: &Prompt, full_nonce: bool) -> Result<Session> {
        let password = match password {
            Some(password) => MasterPassword::from(password),
            None => match mode {
                Mode::Encrypt => prompt.encryption_password()?,
                Mode::Decrypt => prompt.decryption_password()?,
            },
        };

        let nonce = if full_nonce { NameNonce::Full } else { NameNonce::Compact };
        Ok(Session::new(password).with_ciphers(ContentCipher::default(), NameCipher::default().with_nonce(nonce)))
    }

    /// Runs `job` for every input concurrently and reports each result.
    ///
    /// Every file is attempted; the command fails if any of them did.
    async fn run_files<F, Fut>(mode: Mode, inputs: Vec<PathBuf>, output: Option<PathBuf>, session: Session, job: F) -> Result<()>
    where
        F: Fn(Arc<Session>, PathBuf, PathBuf) -> Fut,
        Fut: Future<Output = Result<Outcome>> + Send + 'static,
    {
        let session = Arc::new(session);
        let bar = Bar::new(inputs.len() as u64, mode.label())?;
        let mut tasks = JoinSet::new();

        for input in inputs {
            let dir = file::output_dir(&input, output.as_deref());
            let fut = job(Arc::clone(&session), input.clone(), dir);
            tasks.spawn(async move { (input, fut.await) });
        }

        let mut outcomes = Vec::new();
        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (input, result) = joined.context("file task panicked")?;
            bar.add(1);
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => failures.push((input, error)),
            }
        }
        bar.finish();

        outcomes.sort_by(|a, b| a.input.cmp(&b.input));
        display::show_outcomes(mode, &outcomes);
        for (input, error) in &failures {
            display::show_failure(input, error);
        }

        ensure!(failures.is_empty(), "{} of {} file(s) failed", failures.len(), failures.len() + outcomes.len());
        Ok(())
    }

    async fn encrypt_file(session: Arc<Session>, input: PathBuf, dir: PathBuf, options: EncryptOptions) -> Result<Outcome> {
        let plaintext = file::read_file(&input).await?;
        let name = file::file_name(&input)?.to_owned();

        let (blob, stored_name) = tokio::task::spawn_blocking(move || -> Result<(Vec<u8>, String)> {
            let blob = session.encrypt_content(&plaintext)?;
            let stored_name = if options.keep_name { format!("{name}{BLOB_EXTENSION}") } else { session.encrypt_name(&name)? };
            Ok((blob, stored_name))
        })
        .await
        .context("encryption task panicked")?
        .with_context(|| format!("encryption failed: {}", input.display()))?;

        let output = file::join_name(&dir, &stored_name)?;
        file::write_file(&output, &blob, options.force).await?;
        info!(input = %input.display(), output = %output.display(), "encrypted file");

        Ok(Outcome { input, output, size: blob.len() as u64 })
    }

    async fn decrypt_file(session: Arc<Session>, input: PathBuf, dir: PathBuf, force: bool) -> Result<Outcome> {
        let blob = file::read_file(&input).await?;
        let stored_name = file::file_name(&input)?.to_owned();

        let (plaintext, name) = tokio::task::spawn_blocking(move || -> Result<(Vec<u8>, DisplayName)> {
            let plaintext = session.decrypt_content(&blob)?;
            Ok((plaintext, session.resolve_name(&stored_name)))
        })
        .await
        .context("decryption task panicked")?
        .with_context(|| format!("decryption failed: {}", input.display()))?;

        let output = file::join_name(&dir, restored_name(&name))?;
        if same_path(&output, &input) {
            bail!("output would overwrite the input: {} (use --output)", input.display());
        }

        file::write_file(&output, &plaintext, force).await?;
        info!(input = %input.display(), output = %output.display(), "decrypted file");

        Ok(Outcome { input, output, size: plaintext.len() as u64 })
    }
}

#[derive(Clone, Copy)]
struct EncryptOptions {
    keep_name: bool,
    force: bool,
}

/// Local file name for a decrypted blob.
fn restored_name(name: &DisplayName) -> &str {
    match name {
        DisplayName::Decrypted(name) => name,
        DisplayName::Plaintext(name) => name.strip_suffix(BLOB_EXTENSION).filter(|s| !s.is_empty()).unwrap_or(name),
        DisplayName::Fallback(token) => {
            warn!(name = %token, "content decrypted but name did not, keeping stored name");
            token.strip_suffix(NAME_SUFFIX).filter(|s| !s.is_empty()).unwrap_or(token)
        }
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
