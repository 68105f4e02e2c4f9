//! Wire struct shapes (prost).
//!
//! Field tags follow the protocol's message body schema. Elem sub-structures
//! that the codec never interprets are declared as raw `bytes` so they can be
//! carried through untouched (length-delimited messages and bytes share a
//! wire type).

/// Raw oneof container: one element of a rich text body.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Elem {
    #[prost(message, optional, tag = "1")]
    pub text: Option<Text>,
    #[prost(message, optional, tag = "2")]
    pub face: Option<Face>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub online_image: Option<Vec<u8>>,
    #[prost(message, optional, tag = "4")]
    pub not_online_image: Option<NotOnlineImage>,
    #[prost(message, optional, tag = "5")]
    pub trans_elem_info: Option<TransElem>,
    #[prost(message, optional, tag = "6")]
    pub market_face: Option<MarketFace>,
    #[prost(bytes = "vec", optional, tag = "7")]
    pub elem_flags: Option<Vec<u8>>,
    #[prost(message, optional, tag = "8")]
    pub custom_face: Option<CustomFace>,
    #[prost(message, optional, tag = "9")]
    pub elem_flags2: Option<ElemFlags2>,
    #[prost(bytes = "vec", optional, tag = "10")]
    pub fun_face: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "11")]
    pub secret_file: Option<Vec<u8>>,
    #[prost(message, optional, tag = "12")]
    pub rich_msg: Option<RichMsg>,
    #[prost(bytes = "vec", optional, tag = "13")]
    pub group_file: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "14")]
    pub pub_group: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "15")]
    pub market_trans: Option<Vec<u8>>,
    #[prost(message, optional, tag = "16")]
    pub extra_info: Option<ExtraInfo>,
    #[prost(bytes = "vec", optional, tag = "17")]
    pub shake_window: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "18")]
    pub pub_account: Option<Vec<u8>>,
    #[prost(message, optional, tag = "19")]
    pub video_file: Option<VideoFile>,
    #[prost(bytes = "vec", optional, tag = "20")]
    pub tips_info: Option<Vec<u8>>,
    #[prost(message, optional, tag = "21")]
    pub anon_group_msg: Option<AnonymousGroupMsg>,
    #[prost(bytes = "vec", optional, tag = "22")]
    pub qq_live_old: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "23")]
    pub life_online: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "24")]
    pub qqwallet_msg: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "25")]
    pub crm_elem: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "26")]
    pub conference_tips_info: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "27")]
    pub redbag_info: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "28")]
    pub low_version_tips: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "29")]
    pub bankcode_ctrl_info: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "30")]
    pub near_by_msg: Option<Vec<u8>>,
    #[prost(message, optional, tag = "31")]
    pub custom_elem: Option<CustomElem>,
    #[prost(bytes = "vec", optional, tag = "32")]
    pub location_info: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "33")]
    pub pub_acc_info: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "34")]
    pub small_emoji: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "35")]
    pub fsj_msg_elem: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "36")]
    pub ark_app: Option<Vec<u8>>,
    #[prost(message, optional, tag = "37")]
    pub general_flags: Option<GeneralFlags>,
    #[prost(bytes = "vec", optional, tag = "38")]
    pub hc_flash_pic: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "39")]
    pub deliver_gift_msg: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "40")]
    pub bitapp_msg: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "41")]
    pub open_qq_data: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "42")]
    pub apollo_msg: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "43")]
    pub group_pub_acc_info: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "44")]
    pub bless_msg: Option<Vec<u8>>,
    #[prost(message, optional, tag = "45")]
    pub src_msg: Option<SourceMsg>,
    #[prost(bytes = "vec", optional, tag = "46")]
    pub lola_msg: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "47")]
    pub group_business_msg: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "48")]
    pub msg_workflow_notify: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "49")]
    pub pat_elem: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "50")]
    pub group_post_elem: Option<Vec<u8>>,
    #[prost(message, optional, tag = "51")]
    pub light_app: Option<LightAppElem>,
    #[prost(bytes = "vec", optional, tag = "52")]
    pub eim_info: Option<Vec<u8>>,
    #[prost(message, optional, tag = "53")]
    pub common_elem: Option<CommonElem>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Text {
    #[prost(string, tag = "1")]
    pub str: String,
    #[prost(string, tag = "2")]
    pub link: String,
    #[prost(bytes = "vec", tag = "3")]
    pub attr6_buf: Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub attr7_buf: Vec<u8>,
    #[prost(bytes = "vec", tag = "11")]
    pub buf: Vec<u8>,
    #[prost(bytes = "vec", tag = "12")]
    pub pb_reserve: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Face {
    #[prost(int32, tag = "1")]
    pub index: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub old: Vec<u8>,
    #[prost(bytes = "vec", tag = "11")]
    pub buf: Vec<u8>,
}

/// Group image.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CustomFace {
    #[prost(string, tag = "2")]
    pub file_path: String,
    #[prost(int32, tag = "7")]
    pub file_id: i32,
    #[prost(bytes = "vec", tag = "13")]
    pub md5: Vec<u8>,
    #[prost(string, tag = "16")]
    pub orig_url: String,
    #[prost(int32, tag = "20")]
    pub image_type: i32,
    #[prost(int32, tag = "22")]
    pub width: i32,
    #[prost(int32, tag = "23")]
    pub height: i32,
    #[prost(int32, tag = "25")]
    pub size: i32,
    #[prost(int32, tag = "26")]
    pub origin: i32,
    #[prost(bytes = "vec", tag = "34")]
    pub pb_reserve: Vec<u8>,
}

/// Friend image.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NotOnlineImage {
    #[prost(string, tag = "1")]
    pub file_path: String,
    #[prost(int32, tag = "2")]
    pub file_len: i32,
    #[prost(int32, tag = "5")]
    pub img_type: i32,
    #[prost(bytes = "vec", tag = "7")]
    pub pic_md5: Vec<u8>,
    #[prost(int32, tag = "8")]
    pub pic_height: i32,
    #[prost(int32, tag = "9")]
    pub pic_width: i32,
    #[prost(string, tag = "10")]
    pub res_id: String,
    #[prost(string, tag = "15")]
    pub orig_url: String,
    #[prost(int32, tag = "17")]
    pub original: i32,
    #[prost(bytes = "vec", tag = "29")]
    pub pb_reserve: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransElem {
    #[prost(int32, tag = "1")]
    pub elem_type: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub elem_value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MarketFace {
    #[prost(bytes = "vec", tag = "1")]
    pub face_name: Vec<u8>,
    #[prost(int32, tag = "2")]
    pub item_type: i32,
    #[prost(int32, tag = "3")]
    pub face_info: i32,
    #[prost(bytes = "vec", tag = "4")]
    pub face_id: Vec<u8>,
    #[prost(int32, tag = "5")]
    pub tab_id: i32,
    #[prost(int32, tag = "6")]
    pub sub_type: i32,
    #[prost(bytes = "vec", tag = "7")]
    pub key: Vec<u8>,
    #[prost(bytes = "vec", tag = "8")]
    pub param: Vec<u8>,
    #[prost(int32, tag = "9")]
    pub media_type: i32,
    #[prost(int32, tag = "10")]
    pub image_width: i32,
    #[prost(int32, tag = "11")]
    pub image_height: i32,
    #[prost(bytes = "vec", tag = "12")]
    pub mobile_param: Vec<u8>,
    #[prost(bytes = "vec", tag = "13")]
    pub pb_reserve: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ElemFlags2 {
    #[prost(int32, tag = "5")]
    pub vip_status: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RichMsg {
    #[prost(bytes = "vec", tag = "1")]
    pub template1: Vec<u8>,
    #[prost(int32, tag = "2")]
    pub service_id: i32,
    #[prost(bytes = "vec", tag = "3")]
    pub msg_resid: Vec<u8>,
    #[prost(int32, tag = "4")]
    pub rand: i32,
    #[prost(int32, tag = "5")]
    pub seq: i32,
    #[prost(int32, tag = "6")]
    pub flags: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExtraInfo {
    #[prost(bytes = "vec", tag = "1")]
    pub nick: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub group_card: Vec<u8>,
    #[prost(int32, tag = "3")]
    pub level: i32,
    #[prost(int32, tag = "4")]
    pub flags: i32,
    #[prost(int32, tag = "5")]
    pub group_mask: i32,
    #[prost(int32, tag = "6")]
    pub msg_tail_id: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VideoFile {
    #[prost(bytes = "vec", tag = "1")]
    pub file_uuid: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub file_md5: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub file_name: Vec<u8>,
    #[prost(int32, tag = "4")]
    pub file_format: i32,
    #[prost(int32, tag = "5")]
    pub file_time: i32,
    #[prost(int32, tag = "6")]
    pub file_size: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AnonymousGroupMsg {
    #[prost(int32, tag = "1")]
    pub flags: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub anon_id: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub anon_nick: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CustomElem {
    #[prost(bytes = "vec", tag = "1")]
    pub desc: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
    #[prost(int32, tag = "3")]
    pub enum_type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GeneralFlags {
    #[prost(int32, tag = "1")]
    pub bubble_diy_text_id: i32,
    #[prost(int32, tag = "2")]
    pub group_flag_new: i32,
    #[prost(uint64, tag = "3")]
    pub uin: u64,
    #[prost(bytes = "vec", tag = "4")]
    pub rp_id: Vec<u8>,
    #[prost(int32, tag = "5")]
    pub prp_fold: i32,
    #[prost(int32, tag = "6")]
    pub long_text_flag: i32,
    #[prost(string, tag = "7")]
    pub long_text_resid: String,
    #[prost(int32, tag = "8")]
    pub group_type: i32,
    #[prost(int32, tag = "9")]
    pub to_uin_flag: i32,
    #[prost(int32, tag = "10")]
    pub glamour_level: i32,
    #[prost(int32, tag = "11")]
    pub member_level: i32,
    #[prost(uint64, tag = "12")]
    pub group_rank_seq: u64,
    #[prost(int32, tag = "13")]
    pub olympic_torch: i32,
    #[prost(bytes = "vec", tag = "19")]
    pub pb_reserve: Vec<u8>,
}

/// Embedded quoted source.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SourceMsg {
    #[prost(int32, repeated, tag = "1")]
    pub orig_seqs: Vec<i32>,
    #[prost(int64, tag = "2")]
    pub sender_uin: i64,
    #[prost(int32, tag = "3")]
    pub time: i32,
    #[prost(int32, tag = "4")]
    pub flag: i32,
    /// Raw `Elem` bytes; see `wire::from_elems`.
    #[prost(bytes = "vec", repeated, tag = "5")]
    pub elems: Vec<Vec<u8>>,
    #[prost(int32, tag = "6")]
    pub r#type: i32,
    #[prost(bytes = "vec", tag = "7")]
    pub rich_msg: Vec<u8>,
    #[prost(bytes = "vec", tag = "8")]
    pub pb_reserve: Vec<u8>,
    #[prost(bytes = "vec", tag = "9")]
    pub src_msg: Vec<u8>,
    #[prost(int64, tag = "10")]
    pub to_uin: i64,
    #[prost(bytes = "vec", tag = "11")]
    pub troop_name: Vec<u8>,
}

/// `SourceMsg.pb_reserve` payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SourceResvAttr {
    #[prost(bytes = "vec", tag = "1")]
    pub rich_msg2: Vec<u8>,
    #[prost(int32, tag = "2")]
    pub ori_msgtype: i32,
    #[prost(uint64, tag = "3")]
    pub orig_uids: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LightAppElem {
    #[prost(bytes = "vec", tag = "1")]
    pub data: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub msg_resid: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommonElem {
    #[prost(int32, tag = "1")]
    pub service_type: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub pb_elem: Vec<u8>,
    #[prost(int32, tag = "3")]
    pub business_type: i32,
}

// commonElem sub-protocol payloads, keyed by service type.

/// Poke (service type 2).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgElemInfoServtype2 {
    #[prost(int32, tag = "1")]
    pub poke_type: i32,
    #[prost(string, tag = "2")]
    pub poke_summary: String,
    #[prost(int32, tag = "3")]
    pub double_hit: i32,
    #[prost(int32, tag = "4")]
    pub vaspoke_id: i32,
    #[prost(string, tag = "5")]
    pub vaspoke_name: String,
    #[prost(string, tag = "6")]
    pub vaspoke_minver: String,
    #[prost(int32, tag = "7")]
    pub poke_strength: i32,
}

/// Flash picture (service type 3).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgElemInfoServtype3 {
    #[prost(message, optional, tag = "1")]
    pub flash_troop_pic: Option<CustomFace>,
    #[prost(message, optional, tag = "2")]
    pub flash_c2c_pic: Option<NotOnlineImage>,
}

/// Vip face (service type 23).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgElemInfoServtype23 {
    #[prost(int32, tag = "1")]
    pub face_type: i32,
    #[prost(int32, tag = "2")]
    pub face_bubble_count: i32,
    #[prost(string, tag = "3")]
    pub face_summary: String,
    #[prost(int32, tag = "4")]
    pub flag: i32,
}

/// Large face (service type 33).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgElemInfoServtype33 {
    #[prost(int32, tag = "1")]
    pub index: i32,
    #[prost(string, tag = "2")]
    pub text: String,
    #[prost(string, tag = "3")]
    pub compat: String,
    #[prost(bytes = "vec", tag = "4")]
    pub buf: Vec<u8>,
}

/// Animated sticker (service type 37).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgElemInfoServtype37 {
    #[prost(string, tag = "1")]
    pub pack_id: String,
    #[prost(string, tag = "2")]
    pub sticker_id: String,
    #[prost(int32, tag = "3")]
    pub qsid: i32,
    #[prost(int32, tag = "4")]
    pub source_type: i32,
    #[prost(int32, tag = "5")]
    pub sticker_type: i32,
    #[prost(string, tag = "6")]
    pub result_id: String,
    #[prost(string, tag = "7")]
    pub text: String,
    #[prost(int32, tag = "9")]
    pub random_type: i32,
}

/// Voice attachment, carried beside the elems in a rich text body.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ptt {
    #[prost(int32, tag = "1")]
    pub file_type: i32,
    #[prost(int64, tag = "2")]
    pub src_uin: i64,
    #[prost(bytes = "vec", tag = "4")]
    pub file_md5: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub file_name: Vec<u8>,
    #[prost(int32, tag = "6")]
    pub file_size: i32,
    #[prost(int64, tag = "8")]
    pub file_id: i64,
    #[prost(bool, tag = "11")]
    pub bool_valid: bool,
    #[prost(bytes = "vec", tag = "14")]
    pub file_key: Vec<u8>,
    #[prost(bytes = "vec", tag = "18")]
    pub group_file_key: Vec<u8>,
    #[prost(int32, tag = "19")]
    pub time: i32,
    #[prost(int32, tag = "29")]
    pub format: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RichText {
    /// Raw `Elem` bytes; see `wire::from_elems`.
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub elems: Vec<Vec<u8>>,
    #[prost(message, optional, tag = "4")]
    pub ptt: Option<Ptt>,
}

/// Group file feed entry inside a type-24 trans elem.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ObjMsg {
    #[prost(int32, tag = "1")]
    pub msg_type: i32,
    #[prost(message, repeated, tag = "7")]
    pub msg_content_info: Vec<MsgContentInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgContentInfo {
    #[prost(bytes = "vec", tag = "1")]
    pub content_info_id: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub msg_file: Option<MsgFile>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgFile {
    #[prost(int32, tag = "1")]
    pub bus_id: i32,
    #[prost(string, tag = "2")]
    pub file_path: String,
    #[prost(int64, tag = "3")]
    pub file_size: i64,
    #[prost(string, tag = "4")]
    pub file_name: String,
    #[prost(int64, tag = "5")]
    pub dead_time: i64,
    #[prost(bytes = "vec", tag = "6")]
    pub file_sha1: Vec<u8>,
    #[prost(string, tag = "7")]
    pub ext: String,
    #[prost(bytes = "vec", tag = "8")]
    pub file_md5: Vec<u8>,
}
