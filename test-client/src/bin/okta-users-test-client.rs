// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use clap::Parser;
use okta_users::ClientConfig;
use okta_users::Credentials;
use okta_users_test_client::Tester;
use slog::Drain;

#[derive(Debug, Parser)]
#[clap(about = "Okta Users API test client")]
struct Args {
    /// The org URL
    #[clap(long, env = "OKTA_ORG_URL", default_value = "http://127.0.0.1:4567")]
    url: String,

    /// An API token
    #[clap(long, env = "OKTA_API_TOKEN", default_value = "test-token")]
    token: String,

    /// Send the token as an OAuth bearer token instead of SSWS
    #[clap(long)]
    bearer: bool,

    /// Request timeout in seconds
    #[clap(long, default_value_t = 30)]
    timeout: u64,
}

fn main() -> anyhow::Result<()> {
    let opt: Args = Args::try_parse()?;

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let log = slog::Logger::root(drain, slog::o!());

    let credentials = if opt.bearer {
        Credentials::Bearer(opt.token)
    } else {
        Credentials::Ssws(opt.token)
    };

    let config = ClientConfig::new(opt.url, String::new())
        .with_credentials(credentials)
        .with_timeout(Duration::from_secs(opt.timeout));

    let tester = Tester::new(log, config)?;

    tester.run()?;

    println!("SUCCESS");

    Ok(())
}
