// Control and data connections
pub mod control;
pub mod data_channel;
pub mod network;
pub mod pasv;
pub mod port;
pub mod stream;

#[cfg(test)]
mod test_session;
