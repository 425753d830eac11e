use escvpnet_rust::{EscVpSession, ProjectorControl};

fn main() {
    let mut session = EscVpSession::connect_tcp(
            "10.0.151.55:3629".parse().unwrap()
        ).expect("Failed to connect to device");

    let power = session.power_status().expect("Failed to query power state");
    println!("Power: {power}");

    let hours = session.lamp_hours().expect("Failed to query lamp hours");
    println!("Lamp: {hours}");

    session.close().expect("Failed to close session");
}
