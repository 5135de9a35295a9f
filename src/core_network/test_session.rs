// End-to-end protocol tests against a live server on loopback

use crate::config::{Config, ListFormatterKind};
use crate::core_network::network::serve;
use crate::server::{create_scaffold, ServerContext};
use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::SystemTime;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_rustls::rustls;
use tokio_rustls::TlsConnector;

trait Io: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> Io for T {}

struct TestServer {
    addr: SocketAddr,
    dir: TempDir,
    _certs: Option<TempDir>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.server.list_formatter = ListFormatterKind::Native;
    config
}

async fn start_server(config: Config) -> TestServer {
    start_server_with_certs(config, None).await
}

async fn start_server_with_certs(config: Config, certs: Option<TempDir>) -> TestServer {
    let dir = create_scaffold().unwrap();
    let context = Arc::new(ServerContext::new(config, dir.path()).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(serve(listener, context));
    TestServer {
        addr,
        dir,
        _certs: certs,
        handle,
    }
}

/// A config with TLS enabled, backed by a throwaway self-signed certificate.
fn tls_config(implicit: bool) -> (Config, TempDir) {
    let certs = TempDir::new().unwrap();
    let cert = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let cert_file = certs.path().join("cert.pem");
    let key_file = certs.path().join("key.pem");
    fs::write(&cert_file, cert.serialize_pem().unwrap()).unwrap();
    fs::write(&key_file, cert.serialize_private_key_pem()).unwrap();

    let mut config = test_config();
    config.tls.enabled = true;
    config.tls.cert_file = cert_file;
    config.tls.key_file = key_file;
    config.tls.implicit_tls = implicit;
    (config, certs)
}

struct AcceptAnyCertificate;

impl rustls::client::ServerCertVerifier for AcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::Certificate,
        _intermediates: &[rustls::Certificate],
        _server_name: &rustls::ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<rustls::client::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::ServerCertVerified::assertion())
    }
}

fn tls_connector() -> TlsConnector {
    let config = rustls::ClientConfig::builder()
        .with_safe_defaults()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate))
        .with_no_client_auth();
    TlsConnector::from(Arc::new(config))
}

async fn client_tls<S: Io + 'static>(stream: S) -> Box<dyn Io> {
    let name = rustls::ServerName::try_from("localhost").unwrap();
    Box::new(tls_connector().connect(name, stream).await.unwrap())
}

/// A bare-bones FTP client: one command line out, one reply line in.
struct Client {
    stream: BufReader<Box<dyn Io>>,
}

impl Client {
    async fn connect(server: &TestServer) -> Client {
        let socket = TcpStream::connect(server.addr).await.unwrap();
        let mut client = Client {
            stream: BufReader::new(Box::new(socket)),
        };
        assert_eq!(client.reply().await, "220 fakeftpd");
        client
    }

    async fn connect_implicit_tls(server: &TestServer) -> Client {
        let socket = TcpStream::connect(server.addr).await.unwrap();
        let mut client = Client {
            stream: BufReader::new(client_tls(socket).await),
        };
        assert_eq!(client.reply().await, "220 fakeftpd");
        client
    }

    async fn send(&mut self, line: &str) {
        let stream = self.stream.get_mut();
        stream.write_all(line.as_bytes()).await.unwrap();
        stream.write_all(b"\r\n").await.unwrap();
        stream.flush().await.unwrap();
    }

    /// Next reply line without CRLF; empty once the server hung up.
    async fn reply(&mut self) -> String {
        let mut line = String::new();
        self.stream.read_line(&mut line).await.unwrap();
        line.trim_end_matches(['\r', '\n']).to_string()
    }

    async fn cmd(&mut self, line: &str) -> String {
        self.send(line).await;
        self.reply().await
    }

    async fn login(&mut self) {
        assert_eq!(self.cmd("USER user").await, "331 Password required");
        assert_eq!(self.cmd("PASS password").await, "230 Logged in");
    }

    async fn upgrade_tls(self) -> Client {
        let stream = self.stream.into_inner();
        Client {
            stream: BufReader::new(client_tls(stream).await),
        }
    }

    /// Issues PASV and connects to the advertised address.
    async fn pasv(&mut self) -> TcpStream {
        let reply = self.cmd("PASV").await;
        assert!(reply.starts_with("227 Entering passive mode ("), "{}", reply);
        let addr = parse_pasv_reply(&reply);
        TcpStream::connect(addr).await.unwrap()
    }

    async fn retr_passive(&mut self, path: &str) -> Vec<u8> {
        let mut data = self.pasv().await;
        self.send(&format!("RETR {}", path)).await;
        let reply = self.reply().await;
        assert!(reply.starts_with("150 "), "{}", reply);
        let mut received = Vec::new();
        data.read_to_end(&mut received).await.unwrap();
        assert_eq!(self.reply().await, "226 Transfer complete");
        received
    }

    async fn stor_passive(&mut self, path: &str, contents: &[u8]) {
        let mut data = self.pasv().await;
        self.send(&format!("STOR {}", path)).await;
        let reply = self.reply().await;
        assert!(reply.starts_with("150 "), "{}", reply);
        data.write_all(contents).await.unwrap();
        data.shutdown().await.unwrap();
        drop(data);
        assert_eq!(self.reply().await, "226 Transfer complete");
    }
}

fn parse_pasv_reply(reply: &str) -> SocketAddr {
    let start = reply.find('(').unwrap() + 1;
    let end = reply.find(')').unwrap();
    let octets: Vec<u8> = reply[start..end]
        .split(',')
        .map(|part| part.parse().unwrap())
        .collect();
    assert_eq!(octets.len(), 6);
    let ip = std::net::Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]);
    let port = (u16::from(octets[4]) << 8) | u16::from(octets[5]);
    SocketAddr::from((ip, port))
}

fn port_argument(addr: SocketAddr) -> String {
    let port = addr.port();
    format!("127,0,0,1,{},{}", port >> 8, port & 0xff)
}

#[tokio::test]
async fn test_login_sequence() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;

    assert_eq!(client.cmd("PASS password").await, "503 Bad sequence of commands");
    assert_eq!(client.cmd("USER user").await, "331 Password required");
    assert_eq!(client.cmd("PASS wrong").await, "530 Login incorrect");
    assert_eq!(client.cmd("PASS password").await, "503 Bad sequence of commands");
    assert_eq!(client.cmd("PWD").await, "530 Not logged in");
    client.login().await;
    assert_eq!(client.cmd("PWD").await, "250 OK. Current directory is /");
}

#[tokio::test]
async fn test_user_revokes_login() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    assert_eq!(client.cmd("USER").await, "501 Syntax error");
    assert_eq!(client.cmd("USER other").await, "331 Password required");
    assert_eq!(client.cmd("PWD").await, "530 Not logged in");
    assert_eq!(client.cmd("PASS password").await, "530 Login incorrect");
}

#[tokio::test]
async fn test_empty_password() {
    let mut config = test_config();
    config.auth.password = String::new();
    let server = start_server(config).await;
    let mut client = Client::connect(&server).await;

    assert_eq!(client.cmd("USER user").await, "331 Password required");
    assert_eq!(client.cmd("PASS").await, "230 Logged in");
}

#[tokio::test]
async fn test_unknown_and_unimplemented_verbs() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;

    assert_eq!(
        client.cmd("FOO bar").await,
        "500 Syntax error, command unrecognized: FOO bar"
    );
    assert_eq!(client.cmd("SYST").await, "502 Command not implemented: syst");
    assert_eq!(client.cmd("rnfr x").await, "502 Command not implemented: rnfr");
    assert_eq!(client.cmd("").await, "501 Syntax error");
    assert_eq!(client.cmd("NOOP").await, "200 Nothing done");
}

#[tokio::test]
async fn test_quit_closes_connection() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;

    assert_eq!(client.cmd("QUIT").await, "221 Byebye");
    assert_eq!(client.reply().await, "");
}

#[tokio::test]
async fn test_idle_session_times_out() {
    let mut config = test_config();
    config.server.session_timeout_secs = 1;
    let server = start_server(config).await;
    let mut client = Client::connect(&server).await;

    assert_eq!(client.reply().await, "421 Control connection timed out.");
    assert_eq!(client.reply().await, "");
}

#[tokio::test]
async fn test_transfer_parameters() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    assert_eq!(client.cmd("TYPE i").await, "200 Type set to I");
    assert_eq!(client.cmd("TYPE E").await, "504 Type not implemented");
    assert_eq!(client.cmd("TYPE X").await, "504 Invalid type code");
    assert_eq!(client.cmd("TYPE A T").await, "504 Format not implemented");
    assert_eq!(client.cmd("TYPE A Q").await, "504 Invalid format code");
    assert_eq!(client.cmd("TYPE").await, "501 Syntax error");

    assert_eq!(client.cmd("MODE S").await, "200 Mode set to Stream");
    assert_eq!(client.cmd("MODE B").await, "504 Mode not implemented");
    assert_eq!(client.cmd("MODE Z").await, "504 Invalid mode code");
    assert_eq!(client.cmd("STRU F").await, "200 File structure set to File");
    assert_eq!(client.cmd("STRU R").await, "504 Structure not implemented");
    assert_eq!(client.cmd("STRU Z").await, "504 Invalid structure code");

    // The failed TYPE commands left binary in place.
    let mut data = client.pasv().await;
    client.send("RETR README").await;
    assert_eq!(
        client.reply().await,
        "150 Opening BINARY mode data connection"
    );
    let mut received = Vec::new();
    data.read_to_end(&mut received).await.unwrap();
    assert_eq!(received, b"Contents of README\n");
    assert_eq!(client.reply().await, "226 Transfer complete");
}

#[tokio::test]
async fn test_passive_retr_ascii() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    let received = client.retr_passive("outgoing/getme").await;
    assert_eq!(received, b"Contents of outgoing/getme\r\n");
}

#[tokio::test]
async fn test_second_pasv_is_a_no_op() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    let reply = client.cmd("PASV").await;
    assert!(reply.starts_with("227 "), "{}", reply);
    assert_eq!(client.cmd("PASV").await, "200 Already in passive mode");
}

#[tokio::test]
async fn test_ascii_round_trip() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    client.stor_passive("notes.txt", b"one\r\ntwo\r\n").await;
    let on_disk = fs::read(server.dir.path().join("notes.txt")).unwrap();
    assert_eq!(on_disk, b"one\ntwo\n");

    let received = client.retr_passive("notes.txt").await;
    assert_eq!(received, b"one\r\ntwo\r\n");
}

#[tokio::test]
async fn test_binary_round_trip() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;
    assert_eq!(client.cmd("TYPE I").await, "200 Type set to I");

    let payload: Vec<u8> = (0..=255u8).chain(b"\r\n\n\r".iter().copied()).collect();
    client.stor_passive("/blob.bin", &payload).await;
    let on_disk = fs::read(server.dir.path().join("blob.bin")).unwrap();
    assert_eq!(on_disk, payload);

    let received = client.retr_passive("blob.bin").await;
    assert_eq!(received, payload);
}

#[tokio::test]
async fn test_active_retr() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    let data_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port_arg = port_argument(data_listener.local_addr().unwrap());
    assert_eq!(
        client.cmd(&format!("PORT {}", port_arg)).await,
        "200 PORT command successful"
    );

    client.send("RETR README").await;
    assert_eq!(client.reply().await, "150 Opening ASCII mode data connection");
    let (mut data, _) = data_listener.accept().await.unwrap();
    let mut received = Vec::new();
    data.read_to_end(&mut received).await.unwrap();
    assert_eq!(received, b"Contents of README\r\n");
    assert_eq!(client.reply().await, "226 Transfer complete");
}

#[tokio::test]
async fn test_port_rejections() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    assert_eq!(client.cmd("PORT 127,0,0,1,0,21").await, "504 Command not implemented for that parameter");
    assert_eq!(client.cmd("PORT 127,0,0,1,4").await, "501 Syntax error");
    assert_eq!(client.cmd("PORT 127,0,0,1,4,256").await, "501 Syntax error");
    assert_eq!(client.cmd("PORT").await, "501 Syntax error");
}

#[tokio::test]
async fn test_data_connection_failures() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    assert_eq!(client.cmd("RETR README").await, "425 Use PORT or PASV first");

    let unused = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port_arg = port_argument(unused.local_addr().unwrap());
    drop(unused);
    assert_eq!(
        client.cmd(&format!("PORT {}", port_arg)).await,
        "200 PORT command successful"
    );
    client.send("RETR README").await;
    assert_eq!(client.reply().await, "150 Opening ASCII mode data connection");
    assert_eq!(client.reply().await, "425 Can't open data connection");
    assert_eq!(client.cmd("NOOP").await, "200 Nothing done");
}

#[tokio::test]
async fn test_failed_retr_opens_no_data_connection() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    let reply = client.cmd("PASV").await;
    assert!(reply.starts_with("227 "), "{}", reply);
    let reply = client.cmd("RETR missing.txt").await;
    assert!(reply.starts_with("550 "), "{}", reply);

    // The listener went away with the failed command.
    let reply = client.cmd("PASV").await;
    assert!(reply.starts_with("227 "), "{}", reply);
}

#[tokio::test]
async fn test_sandbox_denials() {
    let server = start_server(test_config()).await;
    let outside = server.dir.path().parent().unwrap().join("fakeftpd-outside.txt");
    let mut client = Client::connect(&server).await;
    client.login().await;
    let reply = client.cmd("PASV").await;
    assert!(reply.starts_with("227 "), "{}", reply);

    assert_eq!(client.cmd("RETR ../../etc/passwd").await, "550 Access denied");
    assert_eq!(client.cmd("STOR ../fakeftpd-outside.txt").await, "550 Access denied");
    assert_eq!(client.cmd("DELE ../README").await, "550 Access denied");
    assert_eq!(client.cmd("LIST ..").await, "550 Access denied");
    assert_eq!(client.cmd("CWD /..").await, "550 Access denied");
    assert_eq!(client.cmd("CDUP").await, "550 Access denied");
    assert!(!outside.exists());
    assert_eq!(client.cmd("PWD").await, "250 OK. Current directory is /");
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_escape_is_denied() {
    let server = start_server(test_config()).await;
    let outside = TempDir::new().unwrap();
    fs::write(outside.path().join("secret"), "secret").unwrap();
    std::os::unix::fs::symlink(outside.path(), server.dir.path().join("link")).unwrap();

    let mut client = Client::connect(&server).await;
    client.login().await;
    assert_eq!(client.cmd("CWD link").await, "550 Access denied");
    assert_eq!(client.cmd("DELE link/secret").await, "550 Access denied");
    assert!(outside.path().join("secret").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_stor_through_dangling_symlink_is_denied() {
    let server = start_server(test_config()).await;
    let outside = TempDir::new().unwrap();
    let missing = outside.path().join("created-by-stor");
    std::os::unix::fs::symlink(&missing, server.dir.path().join("dangling")).unwrap();

    let mut client = Client::connect(&server).await;
    client.login().await;
    let reply = client.cmd("PASV").await;
    assert!(reply.starts_with("227 "), "{}", reply);
    assert_eq!(client.cmd("STOR dangling").await, "550 Access denied");
    assert!(!missing.exists());
}

#[tokio::test]
async fn test_cwd_and_pwd() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    assert_eq!(
        client.cmd("CWD outgoing").await,
        "250 OK. Current directory is /outgoing"
    );
    let reply = client.cmd("CWD nowhere").await;
    assert!(reply.starts_with("550 "), "{}", reply);
    assert_eq!(client.cmd("CWD /README").await, "550 Not a directory");
    assert_eq!(client.cmd("PWD").await, "250 OK. Current directory is /outgoing");

    let received = client.retr_passive("getme").await;
    assert_eq!(received, b"Contents of outgoing/getme\r\n");

    assert_eq!(client.cmd("CDUP").await, "250 OK. Current directory is /");
    assert_eq!(
        client.cmd("CWD /outgoing/../outgoing").await,
        "250 OK. Current directory is /outgoing"
    );
}

#[tokio::test]
async fn test_dele() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;
    client.login().await;

    assert_eq!(client.cmd("DELE").await, "501 Path required");
    assert_eq!(client.cmd("DELE README").await, "250 DELE command successful");
    assert!(!server.dir.path().join("README").exists());
    let reply = client.cmd("DELE README").await;
    assert!(reply.starts_with("550 "), "{}", reply);
}

#[tokio::test]
async fn test_nlst_and_list() {
    let server = start_server(test_config()).await;
    fs::write(server.dir.path().join(".hidden"), "").unwrap();
    let mut client = Client::connect(&server).await;
    client.login().await;
    assert_eq!(client.cmd("TYPE I").await, "200 Type set to I");

    let mut data = client.pasv().await;
    client.send("NLST").await;
    assert_eq!(
        client.reply().await,
        "150 Opening ASCII mode data connection"
    );
    let mut listing = String::new();
    data.read_to_string(&mut listing).await.unwrap();
    assert_eq!(client.reply().await, "226 Transfer complete");
    assert_eq!(listing, "README\r\noutgoing\r\n");

    let listing = client.retr_listing("LIST -la outgoing").await;
    assert!(listing.starts_with('-'), "{}", listing);
    assert!(listing.ends_with(" getme\r\n"), "{}", listing);

    let listing = client.retr_listing("NLST R*").await;
    assert_eq!(listing, "README\r\n");

    let listing = client.retr_listing("NLST outgoing/getme").await;
    assert_eq!(listing, "getme\r\n");
}

impl Client {
    async fn retr_listing(&mut self, command: &str) -> String {
        let mut data = self.pasv().await;
        self.send(command).await;
        let reply = self.reply().await;
        assert!(reply.starts_with("150 "), "{}", reply);
        let mut listing = String::new();
        data.read_to_string(&mut listing).await.unwrap();
        assert_eq!(self.reply().await, "226 Transfer complete");
        listing
    }
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let server = start_server(test_config()).await;
    let mut first = Client::connect(&server).await;
    let mut second = Client::connect(&server).await;
    first.login().await;

    assert_eq!(second.cmd("PWD").await, "530 Not logged in");
    second.login().await;
    assert_eq!(
        first.cmd("CWD outgoing").await,
        "250 OK. Current directory is /outgoing"
    );
    assert_eq!(second.cmd("PWD").await, "250 OK. Current directory is /");
}

#[tokio::test]
async fn test_protection_ordering_without_tls() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;

    assert_eq!(client.cmd("PBSZ 0").await, "503 PBSZ must be preceded by AUTH");
    assert_eq!(client.cmd("PROT P").await, "503 PROT must be preceded by PBSZ");
    assert_eq!(
        client.cmd("AUTH SSL").await,
        "500 Security scheme not implemented: SSL"
    );
    assert_eq!(
        client.cmd("AUTH TLS").await,
        "534 TLS not available. Please configure SSL/TLS in the server."
    );
}

#[tokio::test]
async fn test_explicit_tls_with_protected_data() {
    let (config, certs) = tls_config(false);
    let server = start_server_with_certs(config, Some(certs)).await;
    let mut client = Client::connect(&server).await;

    assert_eq!(client.cmd("AUTH TLS").await, "234 AUTH TLS OK.");
    let mut client = client.upgrade_tls().await;

    assert_eq!(client.cmd("AUTH TLS").await, "503 AUTH already done");
    assert_eq!(client.cmd("PROT P").await, "503 PROT must be preceded by PBSZ");
    assert_eq!(client.cmd("PBSZ 1").await, "501 PBSZ=0");
    assert_eq!(client.cmd("PBSZ 0").await, "200 PBSZ=0");
    assert_eq!(
        client.cmd("PROT S").await,
        "536 Unsupported protection level safe"
    );
    assert_eq!(
        client.cmd("PROT C").await,
        "536 Unsupported protection level clear"
    );
    assert_eq!(client.cmd("PROT X").await, "504 Unknown protection level");
    assert_eq!(client.cmd("PROT P").await, "200 Data protection level P");
    client.login().await;

    let data = client.pasv().await;
    client.send("RETR README").await;
    assert_eq!(
        client.reply().await,
        "150 Opening ASCII mode data connection (TLS)"
    );
    let mut data = client_tls(data).await;
    let mut received = Vec::new();
    data.read_to_end(&mut received).await.unwrap();
    assert_eq!(received, b"Contents of README\r\n");
    assert_eq!(client.reply().await, "226 Transfer complete");

    let data = client.pasv().await;
    client.send("STOR upload.txt").await;
    assert_eq!(
        client.reply().await,
        "150 Opening ASCII mode data connection (TLS)"
    );
    let mut data = client_tls(data).await;
    data.write_all(b"secret\r\n").await.unwrap();
    data.shutdown().await.unwrap();
    drop(data);
    assert_eq!(client.reply().await, "226 Transfer complete");
    assert_eq!(
        fs::read(server.dir.path().join("upload.txt")).unwrap(),
        b"secret\n"
    );
}

#[tokio::test]
async fn test_implicit_tls() {
    let (config, certs) = tls_config(true);
    let server = start_server_with_certs(config, Some(certs)).await;
    let mut client = Client::connect_implicit_tls(&server).await;

    assert_eq!(client.cmd("AUTH TLS").await, "503 AUTH already done");
    assert_eq!(client.cmd("PBSZ 0").await, "200 PBSZ=0");
    client.login().await;
    assert_eq!(client.cmd("PWD").await, "250 OK. Current directory is /");

    // Clear data connections until PROT P.
    assert_eq!(client.retr_passive("README").await, b"Contents of README\r\n");

    assert_eq!(client.cmd("PROT P").await, "200 Data protection level P");
    let data = client.pasv().await;
    client.send("RETR README").await;
    assert_eq!(
        client.reply().await,
        "150 Opening ASCII mode data connection (TLS)"
    );
    let mut data = client_tls(data).await;
    let mut received = Vec::new();
    data.read_to_end(&mut received).await.unwrap();
    assert_eq!(received, b"Contents of README\r\n");
    assert_eq!(client.reply().await, "226 Transfer complete");
}

#[tokio::test]
async fn test_active_tls_retr() {
    let (config, certs) = tls_config(false);
    let server = start_server_with_certs(config, Some(certs)).await;
    let mut client = Client::connect(&server).await;

    assert_eq!(client.cmd("AUTH TLS").await, "234 AUTH TLS OK.");
    let mut client = client.upgrade_tls().await;
    assert_eq!(client.cmd("PBSZ 0").await, "200 PBSZ=0");
    assert_eq!(client.cmd("PROT P").await, "200 Data protection level P");
    client.login().await;

    let data_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port_arg = port_argument(data_listener.local_addr().unwrap());
    assert_eq!(
        client.cmd(&format!("PORT {}", port_arg)).await,
        "200 PORT command successful"
    );

    client.send("RETR README").await;
    assert_eq!(
        client.reply().await,
        "150 Opening ASCII mode data connection (TLS)"
    );
    let (socket, _) = data_listener.accept().await.unwrap();
    let mut data = client_tls(socket).await;
    let mut received = Vec::new();
    data.read_to_end(&mut received).await.unwrap();
    assert_eq!(received, b"Contents of README\r\n");
    assert_eq!(client.reply().await, "226 Transfer complete");
}

#[tokio::test]
async fn test_overlong_command_line_ends_session() {
    let server = start_server(test_config()).await;
    let mut client = Client::connect(&server).await;

    let flood = vec![b'A'; crate::constants::MAX_COMMAND_LINE as usize];
    client.stream.get_mut().write_all(&flood).await.unwrap();
    client.stream.get_mut().flush().await.unwrap();

    // Hung up without a reply, whether by FIN or by reset.
    let mut rest = Vec::new();
    let _ = client.stream.read_to_end(&mut rest).await;
    assert!(rest.is_empty(), "{:?}", String::from_utf8_lossy(&rest));
}
