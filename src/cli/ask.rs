use crate::assistant::Assistant;
use crate::cli::commands::AskArgs;
use crate::errors::DashError;
use crate::repl::renderer;

pub async fn handle_ask(args: AskArgs, quiet: bool) -> Result<(), DashError> {
    let mut assistant = Assistant::new();
    let reply = assistant.ask(&args.text.join(" "))?;
    if quiet {
        println!("{}", reply);
    } else {
        println!("{}", renderer::render_reply(reply));
    }
    Ok(())
}
