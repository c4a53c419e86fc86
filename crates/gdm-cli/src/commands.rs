use anyhow::{bail, Context};
use colored::Colorize;
use gdm_client::{BasicAuth, HttpGateway, MessageClient, Record, TransactionSigner};

use crate::cli::*;
use crate::config::{FileConfig, ResolvedConfig};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    match cli.command {
        Command::Send(args) => cmd_send(args, &file_config),
        Command::Show(args) => cmd_show(args, &file_config),
        Command::List(args) => cmd_list(args, &file_config),
        Command::Keygen(args) => cmd_keygen(args),
    }
}

fn auth_from(connect: &ConnectArgs) -> anyhow::Result<Option<BasicAuth>> {
    match (&connect.auth_user, &connect.auth_password) {
        (Some(username), Some(password)) => Ok(Some(BasicAuth {
            username: username.clone(),
            password: password.clone(),
        })),
        (Some(_), None) => bail!("--auth-password is required when --auth-user is set"),
        (None, Some(_)) => bail!("--auth-user is required when --auth-password is set"),
        (None, None) => Ok(None),
    }
}

fn gateway(connect: &ConnectArgs, config: &ResolvedConfig) -> anyhow::Result<HttpGateway> {
    Ok(HttpGateway::new(&config.url, auth_from(connect)?)?)
}

fn cmd_send(args: SendArgs, file_config: &FileConfig) -> anyhow::Result<()> {
    let config = ResolvedConfig::merge(&args.connect, args.key_file.as_deref(), file_config);
    let key_file = config
        .key_file
        .as_deref()
        .context("no signing key: pass --key-file or set key_file in the config file")?;
    let signer = TransactionSigner::from_key_file(key_file)?;

    let client = MessageClient::new(gateway(&args.connect, &config)?, signer);
    let record = Record::new(
        args.key, args.subject, args.predicate, args.object, args.sender, args.receiver,
    );
    let response = client.create(&record, args.wait)?;

    println!("{} Message {} submitted", "✓".green().bold(), record.key.yellow());
    println!("Response: {response}");
    Ok(())
}

fn cmd_show(args: ShowArgs, file_config: &FileConfig) -> anyhow::Result<()> {
    let config = ResolvedConfig::merge(&args.connect, None, file_config);
    let client = MessageClient::read_only(gateway(&args.connect, &config)?);

    match client.show(&args.key)? {
        Some(record) => {
            println!("{}: {}", "key".bold(), record.key.yellow());
            println!("{}: {}", "subject".bold(), record.subject);
            println!("{}: {}", "predicate".bold(), record.predicate);
            println!("{}: {}", "object".bold(), record.object);
            println!("{}: {}", "sender".bold(), record.sender.cyan());
            println!("{}: {}", "receiver".bold(), record.receiver.cyan());
        }
        None => println!("Message not found: {}", args.key.yellow()),
    }
    Ok(())
}

fn cmd_list(args: ListArgs, file_config: &FileConfig) -> anyhow::Result<()> {
    let config = ResolvedConfig::merge(&args.connect, None, file_config);
    let client = MessageClient::read_only(gateway(&args.connect, &config)?);

    let mut records = client.list()?;
    records.sort_by(|a, b| a.key.cmp(&b.key));

    if records.is_empty() {
        println!("No messages.");
        return Ok(());
    }

    println!(
        "{:<15} {:<15} {:<15} {}",
        "KEY".bold(),
        "SENDER".bold(),
        "RECEIVER".bold(),
        "STATEMENT".bold()
    );
    for record in records {
        println!(
            "{:<15} {:<15.15} {:<15.15} {} {} {}",
            record.key, record.sender, record.receiver,
            record.subject, record.predicate, record.object,
        );
    }
    Ok(())
}

fn cmd_keygen(args: KeygenArgs) -> anyhow::Result<()> {
    let signer = TransactionSigner::generate();
    std::fs::write(&args.path, signer.private_key_hex() + "\n")
        .with_context(|| format!("failed to write key file {}", args.path))?;
    println!("{} Wrote private key to {}", "✓".green().bold(), args.path.bold());
    println!("Public key: {}", signer.public_key_hex().cyan());
    Ok(())
}
