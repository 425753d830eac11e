use std::{thread, time::Duration};

use escvpnet_rust::{EscVpSession, ProjectorControl};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut session = EscVpSession::connect_tcp("10.0.151.55:3629".parse().unwrap()).expect("Failed to connect to device");

    session.power_on()
        .expect("Failed to set power ON");

    println!("Powered on");

    thread::sleep(Duration::from_secs(10));

    session.power_off()
        .expect("Failed to set power off");

    println!("Powered off");
}
