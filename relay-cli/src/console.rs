use anyhow::Result;
use relay_agent::{ConversationAgent, Termination};
use rustyline::DefaultEditor;

pub async fn run_console(mut agent: ConversationAgent) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("Relay Console");
    println!("Type your message and press Enter. `exit` or `quit` to leave.\n");

    loop {
        let readline = rl.readline("You > ");
        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
                    break;
                }

                rl.add_history_entry(&line)?;

                match agent.chat(line).await {
                    Ok(reply) => {
                        println!("\nAssistant > {}\n", reply.text);
                        match reply.termination {
                            Termination::RoundLimit => {
                                println!("(tool round limit reached; the answer may be incomplete)\n");
                            }
                            Termination::Stalled => {
                                println!("(the model requested tool use but sent no requests)\n");
                            }
                            Termination::EndOfTurn => {}
                        }
                    }
                    Err(e) => {
                        eprintln!("\nError: {e}\n");
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("EOF");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    Ok(())
}
