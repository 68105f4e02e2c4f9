use qchain_core::error::RejectReason;
use qchain_core::message::Target;
use qchain_core::wire::proto::RichText;

use crate::send::proto::{C2c, ContentHead, Grp, GrpTmp, MsgBody, PbSendMsgReq, PbSendMsgResp, RoutingHead};

/// Result code the server uses for oversized messages.
pub(crate) const RESULT_TOO_LARGE: i32 = 10;

pub(crate) fn routing_head(target: Target) -> RoutingHead {
    match target {
        Target::Group(code) => RoutingHead {
            grp: Some(Grp { group_code: code }),
            ..Default::default()
        },
        Target::Friend(uin) | Target::Stranger(uin) => RoutingHead {
            c2c: Some(C2c { to_uin: uin }),
            ..Default::default()
        },
        Target::Temp { group, member } => RoutingHead {
            grp_tmp: Some(GrpTmp {
                group_uin: group,
                to_uin: member,
            }),
            ..Default::default()
        },
    }
}

/// Position of one packet in a (possibly fragmented) message.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PacketSlot {
    pub index: usize,
    pub count: usize,
    pub div_seq: i32,
    pub seq: i32,
    pub rand: i32,
}

pub(crate) fn build_request(target: Target, body: RichText, slot: PacketSlot) -> PbSendMsgReq {
    PbSendMsgReq {
        routing_head: Some(routing_head(target)),
        content_head: Some(ContentHead {
            pkg_num: i32::try_from(slot.count).unwrap_or(i32::MAX),
            pkg_index: i32::try_from(slot.index).unwrap_or(i32::MAX),
            div_seq: slot.div_seq,
        }),
        msg_body: Some(MsgBody {
            rich_text: Some(body),
        }),
        msg_seq: slot.seq,
        msg_rand: slot.rand,
        sync_cookie: Vec::new(),
    }
}

/// How the server answered one packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reply {
    Accepted,
    TooLarge,
    Rejected(RejectReason),
    Failed,
}

pub(crate) fn classify(target: Target, resp: &PbSendMsgResp) -> Reply {
    match resp.result {
        0 => Reply::Accepted,
        RESULT_TOO_LARGE => Reply::TooLarge,
        _ => match resp.errtype {
            120 if target.is_group() => Reply::Rejected(RejectReason::Muted),
            104 => Reply::Rejected(RejectReason::AtAllLimited),
            299 => Reply::Rejected(RejectReason::GroupChatLimited),
            121 | 46 => Reply::Rejected(RejectReason::AccountRestricted),
            _ => Reply::Failed,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resp(result: i32, errtype: i32) -> PbSendMsgResp {
        PbSendMsgResp {
            result,
            errtype,
            ..Default::default()
        }
    }

    #[test]
    fn reply_codes() {
        let group = Target::Group(1);
        let friend = Target::Friend(2);
        assert_eq!(classify(group, &resp(0, 0)), Reply::Accepted);
        assert_eq!(classify(friend, &resp(10, 0)), Reply::TooLarge);
        assert_eq!(classify(group, &resp(1, 120)), Reply::Rejected(RejectReason::Muted));
        assert_eq!(classify(friend, &resp(1, 120)), Reply::Failed);
        assert_eq!(classify(group, &resp(1, 104)), Reply::Rejected(RejectReason::AtAllLimited));
        assert_eq!(classify(group, &resp(1, 299)), Reply::Rejected(RejectReason::GroupChatLimited));
        assert_eq!(classify(friend, &resp(1, 46)), Reply::Rejected(RejectReason::AccountRestricted));
    }

    #[test]
    fn routing_by_target() {
        assert_eq!(routing_head(Target::Group(5)).grp, Some(Grp { group_code: 5 }));
        assert_eq!(routing_head(Target::Stranger(6)).c2c, Some(C2c { to_uin: 6 }));
        let tmp = routing_head(Target::Temp { group: 7, member: 8 }).grp_tmp.unwrap_or_default();
        assert_eq!((tmp.group_uin, tmp.to_uin), (7, 8));
    }
}
