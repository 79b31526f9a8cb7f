//! Best-effort rewrite of the opus parameters in a local offer, biasing the
//! codec toward low-latency jam settings before the description is
//! committed. An SDP without an opus rtpmap passes through unchanged.

const LOW_LATENCY_PARAMS: [(&str, &str); 3] = [
    ("minptime", "10"),
    ("stereo", "1"),
    ("maxaveragebitrate", "320000"),
];

pub(crate) fn bias_opus_low_latency(sdp: &str) -> String {
    let payloads: Vec<String> = sdp
        .lines()
        .filter_map(opus_payload_type)
        .map(str::to_string)
        .collect();
    if payloads.is_empty() {
        return sdp.to_string();
    }

    let mut out: Vec<String> = Vec::new();
    for line in sdp.lines() {
        if let Some(rest) = line.strip_prefix("a=fmtp:") {
            if let Some((pt, params)) = rest.split_once(' ') {
                if payloads.iter().any(|p| p == pt) {
                    out.push(format!("a=fmtp:{pt} {}", merge_params(params)));
                    continue;
                }
            }
        }

        out.push(line.to_string());

        // A payload with no fmtp line at all gets one, right after its rtpmap.
        if let Some(pt) = opus_payload_type(line) {
            if !has_fmtp_for(sdp, pt) {
                out.push(format!("a=fmtp:{pt} {}", merge_params("")));
            }
        }
    }

    let mut rewritten = out.join("\r\n");
    rewritten.push_str("\r\n");
    rewritten
}

fn opus_payload_type(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("a=rtpmap:")?;
    let (pt, codec) = rest.split_once(' ')?;
    codec.to_ascii_lowercase().starts_with("opus/").then_some(pt)
}

fn has_fmtp_for(sdp: &str, pt: &str) -> bool {
    sdp.lines().any(|line| {
        line.strip_prefix("a=fmtp:")
            .and_then(|rest| rest.split_once(' '))
            .is_some_and(|(p, _)| p == pt)
    })
}

fn merge_params(existing: &str) -> String {
    let mut params: Vec<(String, String)> = existing
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| match p.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (p.to_string(), String::new()),
        })
        .collect();

    for (key, value) in LOW_LATENCY_PARAMS {
        match params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => params.push((key.to_string(), value.to_string())),
        }
    }

    params
        .into_iter()
        .map(|(k, v)| if v.is_empty() { k } else { format!("{k}={v}") })
        .collect::<Vec<_>>()
        .join(";")
}
