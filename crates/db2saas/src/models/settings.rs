//! Db2 configuration settings
//!
//! The same three groups are sent when applying custom settings and returned
//! when listing tuneable parameters. Every value is an optional string
//! carried under its upper-snake wire name. Settings the service reports
//! that are not declared here are kept in `extra` and sent back unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

macro_rules! custom_settings {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident => $json:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(rename = $json, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )+
            /// Undeclared settings, keyed by wire name.
            #[serde(flatten)]
            pub extra: BTreeMap<String, String>,
        }

        impl $name {
            /// Wire names of every setting in this group.
            pub const SETTING_NAMES: &'static [&'static str] = &[$($json),+];

            /// `(wire name, value)` for every setting, in declaration order.
            pub fn settings(&self) -> Vec<(&'static str, Option<&str>)> {
                vec![$(($json, self.$field.as_deref())),+]
            }

            /// Set a value by wire name, ignoring case. Returns false for
            /// unknown names.
            pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
                match name.to_ascii_uppercase().as_str() {
                    $($json => self.$field = Some(value.into()),)+
                    _ => return false,
                }
                true
            }

            /// Value by wire name, ignoring case. Falls back to `extra`.
            pub fn get(&self, name: &str) -> Option<&str> {
                match name.to_ascii_uppercase().as_str() {
                    $($json => self.$field.as_deref(),)+
                    other => self.extra.get(other).map(String::as_str),
                }
            }

            /// True when no setting is present.
            pub fn is_empty(&self) -> bool {
                $(self.$field.is_none())&&+ && self.extra.is_empty()
            }
        }
    };
}

custom_settings! {
    /// General database settings.
    CustomSettingsDb {
        /// Configures the sort memory limit for DB2.
        act_sortmem_limit => "ACT_SORTMEM_LIMIT",
        /// Configures the collation sequence.
        alt_collate => "ALT_COLLATE",
        /// Sets the application group memory size.
        appgroup_mem_sz => "APPGROUP_MEM_SZ",
        /// Configures the application heap size.
        applheapsz => "APPLHEAPSZ",
        /// Configures the application memory allocation.
        appl_memory => "APPL_MEMORY",
        /// Configures the application control heap size.
        app_ctl_heap_sz => "APP_CTL_HEAP_SZ",
        /// Configures the archive retry delay time.
        archretrydelay => "ARCHRETRYDELAY",
        /// Configures the authentication cache duration.
        authn_cache_duration => "AUTHN_CACHE_DURATION",
        /// Configures whether the database will automatically restart.
        autorestart => "AUTORESTART",
        /// Configures whether auto collection of CG statistics is enabled.
        auto_cg_stats => "AUTO_CG_STATS",
        /// Configures automatic maintenance for the database.
        auto_maint => "AUTO_MAINT",
        /// Configures automatic reorganization for the database.
        auto_reorg => "AUTO_REORG",
        /// Configures the auto refresh or revalidation method.
        auto_reval => "AUTO_REVAL",
        /// Configures automatic collection of run-time statistics.
        auto_runstats => "AUTO_RUNSTATS",
        /// Configures whether auto-sampling is enabled.
        auto_sampling => "AUTO_SAMPLING",
        /// Configures automatic collection of statistics on views.
        auto_stats_views => "AUTO_STATS_VIEWS",
        /// Configures automatic collection of statement-level statistics.
        auto_stmt_stats => "AUTO_STMT_STATS",
        /// Configures automatic table maintenance.
        auto_tbl_maint => "AUTO_TBL_MAINT",
        /// Average number of applications.
        avg_appls => "AVG_APPLS",
        /// Configures the catalog cache size.
        catalogcache_sz => "CATALOGCACHE_SZ",
        /// Configures the change pages threshold percentage.
        chngpgs_thresh => "CHNGPGS_THRESH",
        /// Configures the commit behavior.
        cur_commit => "CUR_COMMIT",
        /// Configures the database memory management.
        database_memory => "DATABASE_MEMORY",
        /// Configures the database heap size.
        dbheap => "DBHEAP",
        /// Specifies the database collation name.
        db_collname => "DB_COLLNAME",
        /// Configures the memory threshold percentage for database.
        db_mem_thresh => "DB_MEM_THRESH",
        /// Defines the default DDL compression behavior.
        ddl_compression_def => "DDL_COMPRESSION_DEF",
        /// Defines the default constraint behavior in DDL.
        ddl_constraint_def => "DDL_CONSTRAINT_DEF",
        /// Configures the decimal floating-point rounding method.
        decflt_rounding => "DECFLT_ROUNDING",
        /// Configures the default arithmetic for decimal operations.
        dec_arithmetic => "DEC_ARITHMETIC",
        /// Configures the decimal-to-character conversion format.
        dec_to_char_fmt => "DEC_TO_CHAR_FMT",
        /// Configures the default degree for parallelism.
        dft_degree => "DFT_DEGREE",
        /// Configures the default extent size for tables.
        dft_extent_sz => "DFT_EXTENT_SZ",
        /// Configures the default load record session count.
        dft_loadrec_ses => "DFT_LOADREC_SES",
        /// Configures the default MTTB (multi-table table scan) types.
        dft_mttb_types => "DFT_MTTB_TYPES",
        /// Configures the default prefetch size for queries.
        dft_prefetch_sz => "DFT_PREFETCH_SZ",
        /// Configures the default query optimization level.
        dft_queryopt => "DFT_QUERYOPT",
        /// Configures the default refresh age for views.
        dft_refresh_age => "DFT_REFRESH_AGE",
        /// Configures whether DCC (database control center) is enabled for schemas.
        dft_schemas_dcc => "DFT_SCHEMAS_DCC",
        /// Configures whether SQL math warnings are enabled.
        dft_sqlmathwarn => "DFT_SQLMATHWARN",
        /// Configures the default table organization (ROW or COLUMN).
        dft_table_org => "DFT_TABLE_ORG",
        /// Configures the deadlock check time in milliseconds.
        dlchktime => "DLCHKTIME",
        /// Configures whether XML character support is enabled.
        enable_xmlchar => "ENABLE_XMLCHAR",
        /// Configures whether extended row size is enabled.
        extended_row_sz => "EXTENDED_ROW_SZ",
        /// Configures the heap ratio for group heap memory.
        groupheap_ratio => "GROUPHEAP_RATIO",
        /// Configures the index recovery method.
        indexrec => "INDEXREC",
        /// Configures whether large aggregation is enabled.
        large_aggregation => "LARGE_AGGREGATION",
        /// Configures the lock list memory size.
        locklist => "LOCKLIST",
        /// Configures the lock timeout duration.
        locktimeout => "LOCKTIMEOUT",
        /// Configures whether index builds are logged.
        logindexbuild => "LOGINDEXBUILD",
        /// Configures whether application information is logged.
        log_appl_info => "LOG_APPL_INFO",
        /// Configures whether DDL statements are logged.
        log_ddl_stmts => "LOG_DDL_STMTS",
        /// Configures the disk capacity log setting.
        log_disk_cap => "LOG_DISK_CAP",
        /// Configures the maximum number of applications.
        maxappls => "MAXAPPLS",
        /// Configures the maximum number of file operations.
        maxfilop => "MAXFILOP",
        /// Configures the maximum number of locks.
        maxlocks => "MAXLOCKS",
        /// Configures whether decimal division by 3 should be handled.
        min_dec_div_3 => "MIN_DEC_DIV_3",
        /// Configures the level of activity metrics to be monitored.
        mon_act_metrics => "MON_ACT_METRICS",
        /// Configures deadlock monitoring settings.
        mon_deadlock => "MON_DEADLOCK",
        /// Configures the lock message level for monitoring.
        mon_lck_msg_lvl => "MON_LCK_MSG_LVL",
        /// Configures lock timeout monitoring settings.
        mon_locktimeout => "MON_LOCKTIMEOUT",
        /// Configures lock wait monitoring settings.
        mon_lockwait => "MON_LOCKWAIT",
        /// Configures the lightweight threshold for monitoring.
        mon_lw_thresh => "MON_LW_THRESH",
        /// Configures the object metrics level for monitoring.
        mon_obj_metrics => "MON_OBJ_METRICS",
        /// Configures the package list size for monitoring.
        mon_pkglist_sz => "MON_PKGLIST_SZ",
        /// Configures the request metrics level for monitoring.
        mon_req_metrics => "MON_REQ_METRICS",
        /// Configures the level of return data for monitoring.
        mon_rtn_data => "MON_RTN_DATA",
        /// Configures whether stored procedure execution list is monitored.
        mon_rtn_execlist => "MON_RTN_EXECLIST",
        /// Configures the level of unit of work (UOW) data for monitoring.
        mon_uow_data => "MON_UOW_DATA",
        /// Configures whether UOW execution list is monitored.
        mon_uow_execlist => "MON_UOW_EXECLIST",
        /// Configures whether UOW package list is monitored.
        mon_uow_pkglist => "MON_UOW_PKGLIST",
        /// Configures the mapping of NCHAR character types.
        nchar_mapping => "NCHAR_MAPPING",
        /// Configures the number of frequent values for optimization.
        num_freqvalues => "NUM_FREQVALUES",
        /// Configures the number of IO cleaners.
        num_iocleaners => "NUM_IOCLEANERS",
        /// Configures the number of IO servers.
        num_ioservers => "NUM_IOSERVERS",
        /// Configures the number of log spans.
        num_log_span => "NUM_LOG_SPAN",
        /// Configures the number of quantiles for optimizations.
        num_quantiles => "NUM_QUANTILES",
        /// Configures the buffer page optimization setting.
        opt_buffpage => "OPT_BUFFPAGE",
        /// Configures the direct workload optimization setting.
        opt_direct_wrkld => "OPT_DIRECT_WRKLD",
        /// Configures the lock list optimization setting.
        opt_locklist => "OPT_LOCKLIST",
        /// Configures the max locks optimization setting.
        opt_maxlocks => "OPT_MAXLOCKS",
        /// Configures the sort heap optimization setting.
        opt_sortheap => "OPT_SORTHEAP",
        /// Configures the page age target for garbage collection.
        page_age_trgt_gcr => "PAGE_AGE_TRGT_GCR",
        /// Configures the page age target for memory collection.
        page_age_trgt_mcr => "PAGE_AGE_TRGT_MCR",
        /// Configures the package cache size.
        pckcachesz => "PCKCACHESZ",
        /// Configures the level of stack trace logging for stored procedures.
        pl_stack_trace => "PL_STACK_TRACE",
        /// Configures whether self-tuning memory is enabled.
        self_tuning_mem => "SELF_TUNING_MEM",
        /// Configures sequence detection for queries.
        seqdetect => "SEQDETECT",
        /// Configures the shared heap threshold size.
        sheapthres_shr => "SHEAPTHRES_SHR",
        /// Configures the soft max setting.
        softmax => "SOFTMAX",
        /// Configures the sort heap memory size.
        sortheap => "SORTHEAP",
        /// Configures the SQL compiler flags.
        sql_ccflags => "SQL_CCFLAGS",
        /// Configures the statistics heap size.
        stat_heap_sz => "STAT_HEAP_SZ",
        /// Configures the statement heap size.
        stmtheap => "STMTHEAP",
        /// Configures the statement concurrency.
        stmt_conc => "STMT_CONC",
        /// Configures the string unit settings.
        string_units => "STRING_UNITS",
        /// Configures whether system time period adjustments are enabled.
        systime_period_adj => "SYSTIME_PERIOD_ADJ",
        /// Configures whether modifications to tracked objects are logged.
        trackmod => "TRACKMOD",
        /// Configures the utility heap size.
        util_heap_sz => "UTIL_HEAP_SZ",
        /// Configures whether WLM (Workload Management) admission control is enabled.
        wlm_admission_ctrl => "WLM_ADMISSION_CTRL",
        /// Configures the WLM agent load target.
        wlm_agent_load_trgt => "WLM_AGENT_LOAD_TRGT",
        /// Configures the CPU limit for WLM workloads.
        wlm_cpu_limit => "WLM_CPU_LIMIT",
        /// Configures the CPU share count for WLM workloads.
        wlm_cpu_shares => "WLM_CPU_SHARES",
        /// Configures the mode of CPU shares for WLM workloads.
        wlm_cpu_share_mode => "WLM_CPU_SHARE_MODE",
    }
}

custom_settings! {
    /// Database manager (instance) settings.
    CustomSettingsDbm {
        /// Configures the communication bandwidth for the database manager.
        comm_bandwidth => "COMM_BANDWIDTH",
        /// Configures the CPU speed for the database manager.
        cpuspeed => "CPUSPEED",
        /// Configures whether the buffer pool is monitored by default.
        dft_mon_bufpool => "DFT_MON_BUFPOOL",
        /// Configures whether lock monitoring is enabled by default.
        dft_mon_lock => "DFT_MON_LOCK",
        /// Configures whether sort operations are monitored by default.
        dft_mon_sort => "DFT_MON_SORT",
        /// Configures whether statement execution is monitored by default.
        dft_mon_stmt => "DFT_MON_STMT",
        /// Configures whether table operations are monitored by default.
        dft_mon_table => "DFT_MON_TABLE",
        /// Configures whether timestamp monitoring is enabled by default.
        dft_mon_timestamp => "DFT_MON_TIMESTAMP",
        /// Configures whether unit of work (UOW) monitoring is enabled by default.
        dft_mon_uow => "DFT_MON_UOW",
        /// Configures the diagnostic level for the database manager.
        diaglevel => "DIAGLEVEL",
        /// Configures whether federated asynchronous mode is enabled.
        federated_async => "FEDERATED_ASYNC",
        /// Configures the type of indexing to be used in the database manager.
        indexrec => "INDEXREC",
        /// Configures the parallelism settings for intra-query parallelism.
        intra_parallel => "INTRA_PARALLEL",
        /// Configures whether fenced routines are kept in memory.
        keepfenced => "KEEPFENCED",
        /// Configures the maximum number of connection retries.
        max_connretries => "MAX_CONNRETRIES",
        /// Configures the maximum degree of parallelism for queries.
        max_querydegree => "MAX_QUERYDEGREE",
        /// Configures the size of the monitoring heap.
        mon_heap_sz => "MON_HEAP_SZ",
        /// Configures the size of multipart queries in MB.
        multipartsizemb => "MULTIPARTSIZEMB",
        /// Configures the level of notifications for the database manager.
        notifylevel => "NOTIFYLEVEL",
        /// Configures the number of initial agents in the database manager.
        num_initagents => "NUM_INITAGENTS",
        /// Configures the number of initial fenced routines.
        num_initfenced => "NUM_INITFENCED",
        /// Configures the number of pool agents.
        num_poolagents => "NUM_POOLAGENTS",
        /// Configures the interval between resync operations.
        resync_interval => "RESYNC_INTERVAL",
        /// Configures the request/response I/O block size.
        rqrioblk => "RQRIOBLK",
        /// Configures the time in minutes for start/stop operations.
        start_stop_time => "START_STOP_TIME",
        /// Configures the utility impact limit.
        util_impact_lim => "UTIL_IMPACT_LIM",
        /// Configures whether the WLM (Workload Management) dispatcher is enabled.
        wlm_dispatcher => "WLM_DISPATCHER",
        /// Configures the concurrency level for the WLM dispatcher.
        wlm_disp_concur => "WLM_DISP_CONCUR",
        /// Configures whether CPU shares are used for WLM dispatcher.
        wlm_disp_cpu_shares => "WLM_DISP_CPU_SHARES",
        /// Configures the minimum utility threshold for WLM dispatcher.
        wlm_disp_min_util => "WLM_DISP_MIN_UTIL",
    }
}

custom_settings! {
    /// Db2 registry variables.
    CustomSettingsRegistry {
        /// Configures the bidi (bidirectional) support for DB2.
        db2bidi => "DB2BIDI",
        /// Configures the DB2 component options (not specified in values).
        db2compopt => "DB2COMPOPT",
        /// Configures the DB2 lock timeout behavior.
        db2lock_to_rb => "DB2LOCK_TO_RB",
        /// Configures whether DB2's self-tuning memory manager (STMM) is enabled.
        db2stmm => "DB2STMM",
        /// Configures the alternate authorization behavior for DB2.
        db2_alternate_authz_behaviour => "DB2_ALTERNATE_AUTHZ_BEHAVIOUR",
        /// Configures how DB2 handles anti-joins.
        db2_antijoin => "DB2_ANTIJOIN",
        /// Configures whether DB2 asynchronous table scanning (ATS) is enabled.
        db2_ats_enable => "DB2_ATS_ENABLE",
        /// Configures whether deferred prepare semantics are enabled in DB2.
        db2_deferred_prepare_semantics => "DB2_DEFERRED_PREPARE_SEMANTICS",
        /// Configures whether uncommitted data is evaluated by DB2.
        db2_evaluncommitted => "DB2_EVALUNCOMMITTED",
        /// Configures extended optimization in DB2 (not specified in values).
        db2_extended_optimization => "DB2_EXTENDED_OPTIMIZATION",
        /// Configures the default percentage of free space for DB2 indexes.
        db2_index_pctfree_default => "DB2_INDEX_PCTFREE_DEFAULT",
        /// Configures whether in-list queries are converted to nested loop joins.
        db2_inlist_to_nljn => "DB2_INLIST_TO_NLJN",
        /// Configures whether DB2 minimizes list prefetching for queries.
        db2_minimize_listprefetch => "DB2_MINIMIZE_LISTPREFETCH",
        /// Configures the number of entries for DB2 object tables.
        db2_object_table_entries => "DB2_OBJECT_TABLE_ENTRIES",
        /// Configures whether DB2's optimizer profile is enabled.
        db2_optprofile => "DB2_OPTPROFILE",
        /// Configures the logging of optimizer statistics (not specified in values).
        db2_optstats_log => "DB2_OPTSTATS_LOG",
        /// Configures the maximum temporary space size for DB2 optimizer.
        db2_opt_max_temp_size => "DB2_OPT_MAX_TEMP_SIZE",
        /// Configures parallel I/O behavior in DB2 (not specified in values).
        db2_parallel_io => "DB2_PARALLEL_IO",
        /// Configures whether reduced optimization is applied in DB2 (not specified in values).
        db2_reduced_optimization => "DB2_REDUCED_OPTIMIZATION",
        /// Configures the selectivity behavior for DB2 queries.
        db2_selectivity => "DB2_SELECTIVITY",
        /// Configures whether DB2 skips deleted rows during query processing.
        db2_skipdeleted => "DB2_SKIPDELETED",
        /// Configures whether DB2 skips inserted rows during query processing.
        db2_skipinserted => "DB2_SKIPINSERTED",
        /// Configures whether DB2 synchronizes lock release attributes.
        db2_sync_release_lock_attributes => "DB2_SYNC_RELEASE_LOCK_ATTRIBUTES",
        /// Configures the types of operations that reuse storage after truncation.
        db2_truncate_reusestorage => "DB2_TRUNCATE_REUSESTORAGE",
        /// Configures whether DB2 uses alternate page cleaning methods.
        db2_use_alternate_page_cleaning => "DB2_USE_ALTERNATE_PAGE_CLEANING",
        /// Configures whether DB2 view reoptimization values are used.
        db2_view_reopt_values => "DB2_VIEW_REOPT_VALUES",
        /// Configures the WLM (Workload Management) settings for DB2 (not specified in values).
        db2_wlm_settings => "DB2_WLM_SETTINGS",
        /// Configures the DB2 workload type.
        db2_workload => "DB2_WORKLOAD",
    }
}
