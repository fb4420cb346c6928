use crate::errors::DashError;
use super::transcript::{Speaker, Transcript};

/// A keyword group and the canned reply it selects.
pub struct ResponseRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

impl ResponseRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Evaluated in order; the first rule with any matching keyword wins.
pub static RESPONSE_RULES: &[ResponseRule] = &[
    ResponseRule {
        name: "critical-vulnerabilities",
        keywords: &["critical", "vulnerabilities"],
        reply: "Based on the latest scan results, I've identified 23 critical vulnerabilities requiring immediate attention. The most urgent include CVE-2024-1086 (Linux Kernel Privilege Escalation) affecting 12 systems with a CVSS score of 9.8. I recommend applying security patches immediately and isolating affected systems.",
    },
    ResponseRule {
        name: "attack-path",
        keywords: &["attack path", "cve-2024-1086"],
        reply: "CVE-2024-1086 presents a significant attack path: Initial Access → Low-privilege user account → Exploit netfilter vulnerability → Privilege escalation to root → System compromise → Lateral movement. This vulnerability has a 96% success rate in lab environments and is actively exploited by APT groups.",
    },
    ResponseRule {
        name: "recommendations",
        keywords: &["recommendations", "security"],
        reply: "My top security recommendations: 1) Patch critical vulnerabilities within 24 hours 2) Implement network segmentation to limit lateral movement 3) Deploy endpoint detection and response (EDR) solutions 4) Conduct regular security assessments 5) Train staff on security awareness. Current security score is 87% - we can improve this to 95% with these measures.",
    },
    ResponseRule {
        name: "scan-results",
        keywords: &["scan", "results"],
        reply: "The latest scan results show 1,247 total scans completed with 23 critical findings and 67 high-severity issues across 892 monitored assets. Network infrastructure shows the highest vulnerability concentration, particularly in web-facing services. Would you like me to prioritize these findings by exploitability?",
    },
];

pub const DEFAULT_REPLY: &str = "I understand your query about cybersecurity. As your Advanced Risk Intelligence Assistant, I can help analyze vulnerabilities, explain attack vectors, provide mitigation strategies, and assess security posture. Could you be more specific about what aspect of security you'd like me to focus on?";

/// Pick the canned reply for any input, including the empty string.
pub fn respond(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    RESPONSE_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.reply)
        .unwrap_or(DEFAULT_REPLY)
}

/// Scripted chat front end: validates input and keeps the conversation.
#[derive(Debug, Default)]
pub struct Assistant {
    transcript: Transcript,
}

impl Assistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ask(&mut self, input: &str) -> Result<&'static str, DashError> {
        let message = input.trim();
        if message.is_empty() {
            return Err(DashError::EmptyInput("Please enter a message".into()));
        }
        let reply = respond(message);
        self.transcript.push(Speaker::User, message);
        self.transcript.push(Speaker::Assistant, reply);
        Ok(reply)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}
