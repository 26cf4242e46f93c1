use std::env;

use portal_api::api::types::device_benefit::DeviceBenefit;
use portal_api::api::types::session::Session;
use portal_api::Portal;

#[tokio::main]
async fn main() {
    env_logger::init();
    let mut session = Session::new();
    session.team_id = env::var("PORTAL_TEAM_ID").ok();
    session.set_cookie(env::var("PORTAL_COOKIE").ok());

    let mut portal = match Portal::with_session(session) {
        Ok(p) => p,
        Err(e) => {
            println!("Unable to create client: {}", e);
            return;
        }
    };
    if !portal.is_logged_in() {
        println!("Please set PORTAL_COOKIE to the 'myacinfo' cookie value and PORTAL_TEAM_ID");
        return;
    }

    match portal.list_device_benefits().await {
        Ok(benefits) => {
            for benefit in &benefits {
                println!(
                    "{:<8} {:>4}/{:<4} full: {:<5} empty: {}",
                    benefit.device_class,
                    benefit.available,
                    benefit.max,
                    benefit.is_full(),
                    benefit.is_empty()
                );
            }
            let profile_devices = DeviceBenefit::select_ios_profile_devices(&benefits);
            println!("{} classes usable in iOS profiles", profile_devices.len());
            if let Some(tv) = DeviceBenefit::select_apple_tv(&benefits) {
                println!("Apple TV slots used: {}", tv.used());
            }
        }
        Err(e) => println!("Failed to list device benefits: {}", e),
    }
}
