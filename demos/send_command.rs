use std::env;

use escvpnet_rust::EscVpSession;

fn main() {
    let command = env::args().nth(1).expect("Usage: send_command <command>");

    let mut session = EscVpSession::connect_tcp(
            "10.0.151.55:3629".parse().unwrap()
        ).expect("Failed to connect to device");

    let answer = session.execute(&command).expect("Failed to execute command");
    println!("Response: {answer}");

    println!("Done")
}
