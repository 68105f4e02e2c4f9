//! Packet-level prost shapes for sending messages and uploading bodies.

use qchain_core::wire::proto::RichText;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PbSendMsgReq {
    #[prost(message, optional, tag = "1")]
    pub routing_head: Option<RoutingHead>,
    #[prost(message, optional, tag = "2")]
    pub content_head: Option<ContentHead>,
    #[prost(message, optional, tag = "3")]
    pub msg_body: Option<MsgBody>,
    #[prost(int32, tag = "4")]
    pub msg_seq: i32,
    #[prost(int32, tag = "5")]
    pub msg_rand: i32,
    #[prost(bytes = "vec", tag = "6")]
    pub sync_cookie: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PbSendMsgResp {
    #[prost(int32, tag = "1")]
    pub result: i32,
    #[prost(string, tag = "2")]
    pub errmsg: String,
    #[prost(int32, tag = "3")]
    pub send_time: i32,
    #[prost(int32, tag = "6")]
    pub errtype: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RoutingHead {
    #[prost(message, optional, tag = "1")]
    pub c2c: Option<C2c>,
    #[prost(message, optional, tag = "2")]
    pub grp: Option<Grp>,
    #[prost(message, optional, tag = "3")]
    pub grp_tmp: Option<GrpTmp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct C2c {
    #[prost(int64, tag = "1")]
    pub to_uin: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Grp {
    #[prost(int64, tag = "1")]
    pub group_code: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpTmp {
    #[prost(int64, tag = "1")]
    pub group_uin: i64,
    #[prost(int64, tag = "2")]
    pub to_uin: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContentHead {
    #[prost(int32, tag = "1")]
    pub pkg_num: i32,
    #[prost(int32, tag = "2")]
    pub pkg_index: i32,
    #[prost(int32, tag = "3")]
    pub div_seq: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgBody {
    #[prost(message, optional, tag = "1")]
    pub rich_text: Option<RichText>,
}

/// Body uploaded for long messages and forwards.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MultiMsgTransmit {
    #[prost(message, repeated, tag = "1")]
    pub msg: Vec<TransmitMsg>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransmitMsg {
    #[prost(message, optional, tag = "1")]
    pub head: Option<TransmitMsgHead>,
    #[prost(message, optional, tag = "3")]
    pub body: Option<MsgBody>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransmitMsgHead {
    #[prost(int64, tag = "1")]
    pub from_uin: i64,
    #[prost(int64, tag = "2")]
    pub to_uin: i64,
    #[prost(int32, tag = "3")]
    pub msg_type: i32,
    #[prost(int32, tag = "5")]
    pub msg_seq: i32,
    #[prost(int32, tag = "6")]
    pub msg_time: i32,
    #[prost(int64, tag = "7")]
    pub msg_uid: i64,
    #[prost(message, optional, tag = "9")]
    pub group_info: Option<TransmitGroupInfo>,
    #[prost(string, tag = "14")]
    pub from_nick: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransmitGroupInfo {
    #[prost(int64, tag = "1")]
    pub group_code: i64,
    #[prost(bytes = "vec", tag = "4")]
    pub group_card: Vec<u8>,
}
