// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::net::SocketAddr;

use anyhow::anyhow;
use clap::Parser;
use okta_users_test_server::create_http_server;
use okta_users_test_server::stderr_logger;

#[derive(Debug, Parser)]
#[clap(about = "In-memory Okta Users API server")]
struct Args {
    /// Address to listen on; the test client defaults to the same one
    #[clap(long, default_value = "127.0.0.1:4567")]
    bind_addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;

    let server = create_http_server(stderr_logger(), args.bind_addr)?;
    server.await.map_err(|e| anyhow!("server stopped: {e}"))
}
