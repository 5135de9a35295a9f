/// Every verb the server recognises. Verbs outside this list are a syntax
/// error; verbs in it without a handler are "not implemented".
#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    ABOR,
    ACCT,
    ALLO,
    APPE,
    AUTH,
    CDUP,
    CWD,
    DELE,
    HELP,
    LIST,
    MKD,
    MODE,
    NLST,
    NOOP,
    PASS,
    PASV,
    PBSZ,
    PORT,
    PROT,
    PWD,
    QUIT,
    REIN,
    REST,
    RETR,
    RMD,
    RNFR,
    RNTO,
    SITE,
    SMNT,
    STAT,
    STOR,
    STOU,
    STRU,
    SYST,
    TYPE,
    USER,
}

impl FtpCommand {
    pub fn from_str(cmd: &str) -> Option<FtpCommand> {
        match cmd.to_ascii_uppercase().as_str() {
            "ABOR" => Some(FtpCommand::ABOR),
            "ACCT" => Some(FtpCommand::ACCT),
            "ALLO" => Some(FtpCommand::ALLO),
            "APPE" => Some(FtpCommand::APPE),
            "AUTH" => Some(FtpCommand::AUTH),
            "CDUP" => Some(FtpCommand::CDUP),
            "CWD" => Some(FtpCommand::CWD),
            "DELE" => Some(FtpCommand::DELE),
            "HELP" => Some(FtpCommand::HELP),
            "LIST" => Some(FtpCommand::LIST),
            "MKD" => Some(FtpCommand::MKD),
            "MODE" => Some(FtpCommand::MODE),
            "NLST" => Some(FtpCommand::NLST),
            "NOOP" => Some(FtpCommand::NOOP),
            "PASS" => Some(FtpCommand::PASS),
            "PASV" => Some(FtpCommand::PASV),
            "PBSZ" => Some(FtpCommand::PBSZ),
            "PORT" => Some(FtpCommand::PORT),
            "PROT" => Some(FtpCommand::PROT),
            "PWD" => Some(FtpCommand::PWD),
            "QUIT" => Some(FtpCommand::QUIT),
            "REIN" => Some(FtpCommand::REIN),
            "REST" => Some(FtpCommand::REST),
            "RETR" => Some(FtpCommand::RETR),
            "RMD" => Some(FtpCommand::RMD),
            "RNFR" => Some(FtpCommand::RNFR),
            "RNTO" => Some(FtpCommand::RNTO),
            "SITE" => Some(FtpCommand::SITE),
            "SMNT" => Some(FtpCommand::SMNT),
            "STAT" => Some(FtpCommand::STAT),
            "STOR" => Some(FtpCommand::STOR),
            "STOU" => Some(FtpCommand::STOU),
            "STRU" => Some(FtpCommand::STRU),
            "SYST" => Some(FtpCommand::SYST),
            "TYPE" => Some(FtpCommand::TYPE),
            "USER" => Some(FtpCommand::USER),
            _ => None,
        }
    }

    /// Lower-case verb, as used in replies and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            FtpCommand::ABOR => "abor",
            FtpCommand::ACCT => "acct",
            FtpCommand::ALLO => "allo",
            FtpCommand::APPE => "appe",
            FtpCommand::AUTH => "auth",
            FtpCommand::CDUP => "cdup",
            FtpCommand::CWD => "cwd",
            FtpCommand::DELE => "dele",
            FtpCommand::HELP => "help",
            FtpCommand::LIST => "list",
            FtpCommand::MKD => "mkd",
            FtpCommand::MODE => "mode",
            FtpCommand::NLST => "nlst",
            FtpCommand::NOOP => "noop",
            FtpCommand::PASS => "pass",
            FtpCommand::PASV => "pasv",
            FtpCommand::PBSZ => "pbsz",
            FtpCommand::PORT => "port",
            FtpCommand::PROT => "prot",
            FtpCommand::PWD => "pwd",
            FtpCommand::QUIT => "quit",
            FtpCommand::REIN => "rein",
            FtpCommand::REST => "rest",
            FtpCommand::RETR => "retr",
            FtpCommand::RMD => "rmd",
            FtpCommand::RNFR => "rnfr",
            FtpCommand::RNTO => "rnto",
            FtpCommand::SITE => "site",
            FtpCommand::SMNT => "smnt",
            FtpCommand::STAT => "stat",
            FtpCommand::STOR => "stor",
            FtpCommand::STOU => "stou",
            FtpCommand::STRU => "stru",
            FtpCommand::SYST => "syst",
            FtpCommand::TYPE => "type",
            FtpCommand::USER => "user",
        }
    }

    pub fn is_implemented(self) -> bool {
        !matches!(
            self,
            FtpCommand::ABOR
                | FtpCommand::ACCT
                | FtpCommand::ALLO
                | FtpCommand::APPE
                | FtpCommand::HELP
                | FtpCommand::MKD
                | FtpCommand::REIN
                | FtpCommand::REST
                | FtpCommand::RMD
                | FtpCommand::RNFR
                | FtpCommand::RNTO
                | FtpCommand::SITE
                | FtpCommand::SMNT
                | FtpCommand::STAT
                | FtpCommand::STOU
                | FtpCommand::SYST
        )
    }

    /// Commands usable before login.
    pub fn requires_login(self) -> bool {
        !matches!(
            self,
            FtpCommand::USER
                | FtpCommand::PASS
                | FtpCommand::QUIT
                | FtpCommand::NOOP
                | FtpCommand::AUTH
                | FtpCommand::PBSZ
                | FtpCommand::PROT
                | FtpCommand::SYST
                | FtpCommand::HELP
        )
    }

    /// Commands that consume the pending data connection.
    pub fn uses_data_channel(self) -> bool {
        matches!(
            self,
            FtpCommand::STOR | FtpCommand::RETR | FtpCommand::LIST | FtpCommand::NLST
        )
    }
}
