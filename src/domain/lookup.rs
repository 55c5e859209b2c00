// src/domain/lookup.rs
//
// Static course and department tables.
// Each entry is serialised as its acronym; labels are the institutional names.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

macro_rules! lookup_table {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Acronym used in storage and user input
            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn is_valid(code: &str) -> bool {
                code.parse::<$name>().is_ok()
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($code => Ok($name::$variant),)+
                    other => Err(DomainError::InvalidInput(format!(
                        "unknown {} '{}'",
                        $what, other
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }
    };
}

lookup_table! {
    /// Undergraduate course a student is enrolled in
    Course, "course" {
        Adm => ("ADM", "Administração"),
        ArqUrb => ("ARQ_URB", "Arquitetura e Urbanismo"),
        ArtCen => ("ART_CEN", "Artes Cênicas"),
        CienEcon => ("CIEN_ECON", "Ciências Econômicas"),
        CienSociol => ("CIEN_SOCIOL", "Ciências Sociais"),
        CienComp => ("CIEN_COMP", "Ciência da Computação"),
        ComSoc => ("COM_SOC", "Comunicação Social"),
        Dsgn => ("DSGN", "Design"),
        Law => ("LAW", "Direito"),
        EngAmb => ("ENG_AMB", "Engenharia Ambiental"),
        EngCiv => ("ENG_CIV", "Engenharia Civil"),
        EngComp => ("ENG_COMP", "Engenharia de Computação"),
        EngContrlAut => ("ENG_CONTRLAUT", "Engenharia de Controle e Automação"),
        EngEletr => ("ENG_ELETR", "Engenharia Elétrica"),
        EngInd => ("ENG_IND", "Engenharia Industrial"),
        EngMec => ("ENG_MEC", "Engenharia Mecânica"),
        EngMat => ("ENG_MAT", "Engenharia de Materiais"),
        EngProd => ("ENG_PROD", "Engenharia de Produção"),
        EngQuim => ("ENG_QUIM", "Engenharia Química"),
        PubliCom => ("PUBLI_COM", "Publicidade e Comunicação"),
        Cinem => ("CINEM", "Cinema"),
        ComunicTec => ("COMUNIC_TEC", "Comunicação Digital"),
        Pharm => ("PHARM", "Farmácia"),
        Philos => ("PHILOS", "Filosofia"),
        Phys => ("PHYS", "Física"),
        Geo => ("GEO", "Geografia"),
        Hist => ("HIST", "História"),
        Ai => ("AI", "Inteligência Artificial"),
        Journ => ("JOURN", "Jornalismo"),
        Lit => ("LIT", "Letras"),
        Math => ("MATH", "Matemática"),
        AppMath => ("APP_MATH", "Matemática Aplicada"),
        Ir => ("IR", "Relações Internacionais"),
        Neuro => ("NEURO", "Neurociência"),
        Nutr => ("NUTR", "Nutrição"),
        Pedag => ("PEDAG", "Pedagogia"),
        Psych => ("PSYCH", "Psicologia"),
        Chem => ("CHEM", "Química"),
        SocServ => ("SOC_SERV", "Serviço Social"),
    }
}

lookup_table! {
    /// Academic department a professor belongs to
    Department, "department" {
        Adm => ("ADM", "Administração"),
        Dau => ("DAU", "Arquitetura e Urbanismo"),
        Dad => ("DAD", "Design e Artes"),
        Bio => ("BIO", "Biologia"),
        Cis => ("CIS", "Ciências Sociais"),
        Com => ("COM", "Comunicação"),
        Law => ("LAW", "Direito"),
        Econ => ("ECON", "Economia"),
        Edu => ("EDU", "Educação"),
        Civ => ("CIV", "Engenharia Civil"),
        Ele => ("ELE", "Engenharia Elétrica"),
        Ind => ("IND", "Engenharia Industrial"),
        Deqm => ("DEQM", "Engenharia Química e de Materiais"),
        Mec => ("MEC", "Engenharia Mecânica"),
        Philos => ("PHILOS", "Filosofia"),
        Phys => ("PHYS", "Física"),
        Geo => ("GEO", "Geografia"),
        His => ("HIS", "História"),
        Inf => ("INF", "Informática"),
        Lit => ("LIT", "Letras"),
        Math => ("MATH", "Matemática"),
        Med => ("MED", "Medicina"),
        Psych => ("PSYCH", "Psicologia"),
        Chem => ("CHEM", "Química"),
        SocServ => ("SOC_SERV", "Serviço Social"),
        Theo => ("THEO", "Teologia"),
        Iri => ("IRI", "Relações Internacionais"),
    }
}
