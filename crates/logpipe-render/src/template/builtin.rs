//! Fluentd plugin templates compiled into the binary.
//!
//! Every builtin expects `pattern` (the tag pattern derived from the input
//! selector) in the context. Optional parameters fall back to fluentd's
//! usual defaults through Tera's `default` filter.

use std::borrow::Cow;

use super::TemplateSource;
use crate::error::{RenderError, RenderResult};

const STDOUT: &str = r#"<match {{ pattern }}.**>
  @type stdout
</match>
"#;

const FORWARD: &str = r#"<match {{ pattern }}.**>
  @type forward
  <server>
    host {{ host }}
    port {{ port | default(value="24224") }}
  </server>
</match>
"#;

const S3: &str = r#"<match {{ pattern }}.**>
  @type s3

  aws_key_id {{ aws_key_id }}
  aws_sec_key {{ aws_sec_key }}
  s3_bucket {{ s3_bucket }}
  s3_region {{ s3_region }}
  store_as {{ store_as | default(value="gzip") }}

  path logs/${tag}/%Y/%m/%d/
  s3_object_key_format %{path}%{time_slice}_%{index}.%{file_extension}

  <buffer tag,time>
    @type file
    path /buffers/s3
    timekey {{ buffer_timekey | default(value="1h") }}
    timekey_wait {{ buffer_timekey_wait | default(value="10m") }}
    timekey_use_utc true
  </buffer>
  <format>
    @type json
  </format>
</match>
"#;

const GCS: &str = r#"<match {{ pattern }}.**>
  @type gcs

  project {{ project }}
  keyfile {{ keyfile | default(value="/secret/credentials.json") }}
  bucket {{ bucket }}
  store_as {{ store_as | default(value="gzip") }}

  path logs/${tag}/%Y/%m/%d/
  object_key_format %{path}%{time_slice}_%{index}.%{file_extension}

  <buffer tag,time>
    @type file
    path /buffers/gcs
    timekey {{ buffer_timekey | default(value="1h") }}
    timekey_wait {{ buffer_timekey_wait | default(value="10m") }}
    timekey_use_utc true
  </buffer>
  <format>
    @type json
  </format>
</match>
"#;

const ELASTICSEARCH: &str = r#"<match {{ pattern }}.**>
  @type elasticsearch
  @log_level info
  include_tag_key true
  host {{ host }}
  port {{ port | default(value="9200") }}
  scheme {{ scheme | default(value="http") }}
  ssl_verify {{ ssl_verify | default(value="true") }}
  logstash_format {{ logstash_format | default(value="true") }}
{%- if user is defined %}
  user {{ user }}
  password {{ password | default(value="") }}
{%- endif %}
  reload_connections false
  <buffer>
    @type file
    path /buffers/elasticsearch
    flush_mode interval
    flush_interval {{ buffer_flush_interval | default(value="5s") }}
    retry_type exponential_backoff
    chunk_limit_size {{ buffer_chunk_limit_size | default(value="2M") }}
    queue_limit_length {{ buffer_queue_limit_length | default(value="8") }}
    overflow_action block
  </buffer>
</match>
"#;

const PARSER: &str = r#"<filter {{ pattern }}.**>
  @type parser
  key_name {{ key_name | default(value="log") }}
  reserve_data true
  remove_key_name_field true
  <parse>
    @type {{ format }}
    time_format {{ time_format | default(value="%d/%b/%Y:%H:%M:%S %z") }}
  </parse>
</filter>
"#;

const CATALOGUE: &[(&str, &str)] = &[
    ("elasticsearch", ELASTICSEARCH),
    ("forward", FORWARD),
    ("gcs", GCS),
    ("parser", PARSER),
    ("s3", S3),
    ("stdout", STDOUT),
];

/// The template catalogue shipped with logpipe.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateSource for BuiltinTemplates {
    fn get(&self, plugin_type: &str) -> RenderResult<Cow<'_, str>> {
        tracing::trace!(plugin_type, "Looking up builtin template");
        CATALOGUE
            .iter()
            .find(|(name, _)| *name == plugin_type)
            .map(|(_, text)| Cow::Borrowed(*text))
            .ok_or_else(|| RenderError::template_not_found(plugin_type))
    }

    fn plugin_types(&self) -> Vec<String> {
        CATALOGUE.iter().map(|(name, _)| (*name).to_string()).collect()
    }
}
